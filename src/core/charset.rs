use crate::generators::errors::InvalidCharsetError;
use std::collections::BTreeMap;
use std::fmt;

/// A raw, unvalidated charset: position index to the characters allowed there.
///
/// Keys are signed so that invalid (negative) positions can be represented and
/// rejected by [`normalize`] rather than by the type system at the call site.
///
/// # Example
///
/// ```
/// use wlgen::{Charset, normalize};
///
/// let charset = Charset::new().position(0, "123").position(1, "ABC");
/// let normalized = normalize(&charset).unwrap();
///
/// assert_eq!(normalized.positions(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Charset {
    positions: BTreeMap<i64, String>,
}

impl Charset {
    /// Creates an empty charset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a position.
    pub fn position(mut self, position: i64, chars: impl Into<String>) -> Self {
        self.positions.insert(position, chars.into());
        self
    }

    /// Inserts a position, returning the characters it replaced.
    pub fn insert(&mut self, position: i64, chars: impl Into<String>) -> Option<String> {
        self.positions.insert(position, chars.into())
    }

    /// Builds a charset from consecutive position strings, numbered from 0.
    pub fn from_positions<I, S>(positions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        positions
            .into_iter()
            .enumerate()
            .map(|(i, chars)| (i as i64, chars))
            .collect()
    }

    /// Parses one charset spec string per position (ranges, classes, escapes).
    ///
    /// See [`crate::core::syntax::parse_position`] for the syntax.
    pub fn parse_positions<I, S>(specs: I) -> Result<Self, InvalidCharsetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut charset = Charset::new();
        for (i, spec) in specs.into_iter().enumerate() {
            charset.insert(i as i64, super::syntax::parse_position(spec.as_ref())?);
        }
        Ok(charset)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates positions in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.positions.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for Charset {
    fn from_iter<T: IntoIterator<Item = (i64, S)>>(iter: T) -> Self {
        Charset {
            positions: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

/// A validated charset in canonical form.
///
/// Every alphabet is deduplicated and sorted by codepoint, positions run
/// contiguously from 0. All generation strategies consume this read-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedCharset {
    alphabets: Vec<Vec<char>>,
}

impl NormalizedCharset {
    /// Wraps a charset that the caller asserts is already clean.
    ///
    /// No validation, deduplication or sorting happens here. Positions are
    /// taken in ascending key order. If the input holds duplicates or is
    /// unsorted, the wordlist will contain those duplicates in that order;
    /// an empty alphabet or empty charset yields an empty wordlist.
    /// Garbage in, garbage out.
    pub fn assume_clean(raw: &Charset) -> Self {
        NormalizedCharset {
            alphabets: raw.iter().map(|(_, chars)| chars.chars().collect()).collect(),
        }
    }

    /// Number of positions (the length of every generated word, in chars).
    pub fn positions(&self) -> usize {
        self.alphabets.len()
    }

    pub fn alphabet(&self, position: usize) -> Option<&[char]> {
        self.alphabets.get(position).map(|a| a.as_slice())
    }

    pub fn alphabets(&self) -> &[Vec<char>] {
        &self.alphabets
    }

    /// Alphabet sizes, outermost position first.
    pub fn radices(&self) -> impl Iterator<Item = usize> + '_ {
        self.alphabets.iter().map(|a| a.len())
    }

    /// True when the product is empty (no positions, or an empty alphabet).
    ///
    /// Only reachable through [`NormalizedCharset::assume_clean`].
    pub fn is_empty_product(&self) -> bool {
        self.alphabets.is_empty() || self.alphabets.iter().any(|a| a.is_empty())
    }

    /// Converts back to a raw charset, e.g. to normalize it again.
    pub fn to_charset(&self) -> Charset {
        Charset::from_positions(self.alphabets.iter().map(|a| a.iter().collect::<String>()))
    }
}

impl fmt::Display for NormalizedCharset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, alphabet) in self.alphabets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", i, alphabet.iter().collect::<String>())?;
        }
        write!(f, "}}")
    }
}

/// Validates a raw charset and brings it into canonical form.
///
/// Each alphabet is deduplicated and sorted by codepoint. Fails when the
/// charset is empty, when a key is negative, when keys skip a position, or
/// when any alphabet is empty.
pub fn normalize(raw: &Charset) -> Result<NormalizedCharset, InvalidCharsetError> {
    if raw.is_empty() {
        return Err(InvalidCharsetError::EmptyCharset);
    }

    let mut alphabets = Vec::with_capacity(raw.len());
    for (expected, (position, chars)) in (0i64..).zip(raw.iter()) {
        if position < 0 {
            return Err(InvalidCharsetError::NegativePosition { position });
        }
        if position != expected {
            return Err(InvalidCharsetError::NonContiguousPosition {
                expected,
                found: position,
            });
        }

        let mut alphabet: Vec<char> = chars.chars().collect();
        let raw_len = alphabet.len();
        alphabet.sort_unstable();
        alphabet.dedup();

        if alphabet.is_empty() {
            return Err(InvalidCharsetError::EmptyAlphabet { position });
        }
        if alphabet.len() != raw_len {
            tracing::trace!(
                position,
                removed = raw_len - alphabet.len(),
                "collapsed duplicate characters"
            );
        }

        alphabets.push(alphabet);
    }

    Ok(NormalizedCharset { alphabets })
}
