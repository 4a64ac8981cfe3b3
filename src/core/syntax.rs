//! Compact syntax for writing a single position's alphabet.
//!
//! - literal characters: `abc`
//! - inclusive codepoint ranges: `a-z`, `0-9` (a `-` first or last is literal)
//! - escapes: `\-`, `\\`, `\?`
//! - named classes: `?l` lowercase, `?u` uppercase, `?d` digits, `?h` hex
//!   digits, `?s` ASCII punctuation and space, `?a` all of l, u, d and s
//!
//! The output is not deduplicated; that is the normalizer's job.

use crate::generators::errors::InvalidCharsetError;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const HEX_DIGITS: &str = "0123456789abcdef";
pub const SPECIAL: &str = " !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

fn class(name: char) -> Option<String> {
    let chars = match name {
        'l' => LOWERCASE.to_string(),
        'u' => UPPERCASE.to_string(),
        'd' => DIGITS.to_string(),
        'h' => HEX_DIGITS.to_string(),
        's' => SPECIAL.to_string(),
        'a' => [LOWERCASE, UPPERCASE, DIGITS, SPECIAL].concat(),
        _ => return None,
    };
    Some(chars)
}

/// Expands one position spec into the characters it denotes.
///
/// ```
/// use wlgen::core::syntax::parse_position;
///
/// assert_eq!(parse_position("a-d").unwrap(), "abcd");
/// assert_eq!(parse_position("?d").unwrap(), "0123456789");
/// assert_eq!(parse_position(r"x\-y").unwrap(), "x-y");
/// ```
pub fn parse_position(spec: &str) -> Result<String, InvalidCharsetError> {
    let chars: Vec<char> = spec.chars().collect();
    let mut out = String::with_capacity(spec.len());
    let mut i = 0;

    // Reads one literal (possibly escaped) character at `i`, returning it and the next offset.
    let literal = |i: usize| -> Result<(char, usize), InvalidCharsetError> {
        match chars[i] {
            '\\' => match chars.get(i + 1) {
                Some(&c) => Ok((c, i + 2)),
                None => Err(InvalidCharsetError::malformed(spec, i, "dangling escape")),
            },
            c => Ok((c, i + 1)),
        }
    };

    while i < chars.len() {
        if chars[i] == '?' {
            let name = chars
                .get(i + 1)
                .ok_or_else(|| InvalidCharsetError::malformed(spec, i, "missing class name"))?;
            let expanded = class(*name).ok_or_else(|| {
                InvalidCharsetError::malformed(spec, i + 1, format!("unknown class '?{}'", name))
            })?;
            out.push_str(&expanded);
            i += 2;
            continue;
        }

        let (start, next) = literal(i)?;

        // `x-y` is a range unless the dash is the last character
        if chars.get(next) == Some(&'-') && next + 1 < chars.len() {
            let (end, after) = literal(next + 1)?;
            if end < start {
                return Err(InvalidCharsetError::malformed(spec, i, "reversed range"));
            }
            out.extend(start..=end);
            i = after;
        } else {
            out.push(start);
            i = next;
        }
    }

    Ok(out)
}
