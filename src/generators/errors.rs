use crate::core::config::GenerationMethod;
use num_bigint::BigUint;
use std::fmt;

/// Errors raised while validating or parsing a charset.
///
/// Always surfaced at normalization time, before any word is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidCharsetError {
    /// The charset has no positions at all
    EmptyCharset,
    /// A position has no characters
    EmptyAlphabet { position: i64 },
    /// A position key is below zero
    NegativePosition { position: i64 },
    /// Positions must run 0, 1, 2, ... without gaps
    NonContiguousPosition { expected: i64, found: i64 },
    /// A position spec string could not be parsed
    MalformedSpec {
        spec: String,
        offset: usize,
        reason: String,
    },
}

impl InvalidCharsetError {
    /// Create a MalformedSpec error with context
    pub fn malformed(spec: &str, offset: usize, reason: impl Into<String>) -> Self {
        let display_spec = if spec.chars().count() > 60 {
            format!("{}...", spec.chars().take(60).collect::<String>())
        } else {
            spec.to_string()
        };

        InvalidCharsetError::MalformedSpec {
            spec: display_spec,
            offset,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for InvalidCharsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        match self {
            InvalidCharsetError::EmptyCharset => {
                write_error(f, use_color, "charset has no positions")?;
                write_hint(f, use_color, "define at least one position, e.g. `wlgen abc 0-9`")
            }
            InvalidCharsetError::EmptyAlphabet { position } => {
                write_error(
                    f,
                    use_color,
                    &format!("position {} has an empty alphabet", position),
                )?;
                write_hint(f, use_color, "every position needs at least one character")
            }
            InvalidCharsetError::NegativePosition { position } => write_error(
                f,
                use_color,
                &format!("position {} is negative", position),
            ),
            InvalidCharsetError::NonContiguousPosition { expected, found } => {
                write_error(
                    f,
                    use_color,
                    &format!(
                        "positions are not contiguous: expected {}, found {}",
                        expected, found
                    ),
                )?;
                write_hint(f, use_color, "positions must be numbered 0, 1, 2, ... without gaps")
            }
            InvalidCharsetError::MalformedSpec {
                spec,
                offset,
                reason,
            } => {
                write_error(
                    f,
                    use_color,
                    &format!("malformed charset spec: {} at offset {}", reason, offset),
                )?;
                writeln!(f)?;
                writeln!(f, "  {}", spec)?;
                write!(f, "  {}", " ".repeat(*offset))?;
                if use_color {
                    write!(f, "\x1b[1;31m^\x1b[0m")
                } else {
                    write!(f, "^")
                }
            }
        }
    }
}

impl std::error::Error for InvalidCharsetError {}

/// Errors raised by the dispatcher and the generation strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The charset failed validation
    InvalidCharset(InvalidCharsetError),
    /// An explicitly requested strategy cannot run on this build or CPU
    UnsupportedMethod {
        method: GenerationMethod,
        reason: String,
    },
    /// Materializing the wordlist would exceed the eager limit
    TooLarge { count: BigUint, limit: u64 },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        match self {
            GenerateError::InvalidCharset(e) => write!(f, "{}", e),
            GenerateError::UnsupportedMethod { method, reason } => {
                write_error(
                    f,
                    use_color,
                    &format!("generation method '{}' is unavailable: {}", method, reason),
                )?;
                write_hint(
                    f,
                    use_color,
                    "use `--method auto` or `wlgen --capabilities` to inspect this build",
                )
            }
            GenerateError::TooLarge { count, limit } => {
                write_error(
                    f,
                    use_color,
                    &format!(
                        "refusing to materialize {} combinations in memory (limit: {})",
                        count, limit
                    ),
                )?;
                write_hint(
                    f,
                    use_color,
                    "use a lazy method (`--method iter`) or `--memory-efficient`",
                )
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::InvalidCharset(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InvalidCharsetError> for GenerateError {
    fn from(e: InvalidCharsetError) -> Self {
        GenerateError::InvalidCharset(e)
    }
}

/// Error when a generation method name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethodError {
    pub name: String,
    pub suggestion: Option<String>,
}

impl UnknownMethodError {
    pub fn new(name: impl Into<String>, suggestion: Option<String>) -> Self {
        Self {
            name: name.into(),
            suggestion,
        }
    }
}

impl fmt::Display for UnknownMethodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        write_error(
            f,
            use_color,
            &format!("unknown generation method '{}'", self.name),
        )?;

        if let Some(suggestion) = &self.suggestion {
            write_hint(f, use_color, &format!("did you mean '{}'?", suggestion))?;
        }

        write!(f, "\n      valid methods: ")?;
        let names: Vec<&str> = GenerationMethod::ALL.iter().map(|m| m.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl std::error::Error for UnknownMethodError {}

fn write_error(f: &mut fmt::Formatter<'_>, use_color: bool, message: &str) -> fmt::Result {
    if use_color {
        write!(f, "\x1b[1;31merror:\x1b[0m {}", message)
    } else {
        write!(f, "error: {}", message)
    }
}

fn write_hint(f: &mut fmt::Formatter<'_>, use_color: bool, message: &str) -> fmt::Result {
    if use_color {
        write!(f, "\n\x1b[1;36mhint:\x1b[0m {}", message)
    } else {
        write!(f, "\nhint: {}", message)
    }
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest known name, if any is within a small edit distance
pub fn find_closest_name(name: &str, available: &[&str]) -> Option<String> {
    let threshold = if name.len() < 5 { 2 } else { 3 };

    available
        .iter()
        .map(|candidate| (levenshtein_distance(name, candidate), *candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.to_string())
}
