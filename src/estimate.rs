//! Exact wordlist sizes without enumerating anything.

use crate::core::charset::{Charset, NormalizedCharset, normalize};
use crate::generators::errors::InvalidCharsetError;
use crate::output::LineEnding;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// Number of words in the wordlist: the product of all alphabet sizes.
///
/// The count is exact at any size. A charset without positions has no
/// words, which can only happen through [`NormalizedCharset::assume_clean`].
///
/// ```
/// use wlgen::{Charset, estimate_size, normalize};
///
/// let charset = normalize(&Charset::from_positions(["123", "AB"])).unwrap();
/// assert_eq!(estimate_size(&charset), 6u32.into());
/// ```
pub fn estimate_size(charset: &NormalizedCharset) -> BigUint {
    if charset.positions() == 0 {
        return BigUint::zero();
    }
    charset.radices().map(BigUint::from).product()
}

/// Normalizes `raw` first, then estimates.
pub fn estimate_raw_size(raw: &Charset) -> Result<BigUint, InvalidCharsetError> {
    Ok(estimate_size(&normalize(raw)?))
}

/// Pre-flight numbers for a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordlistEstimate {
    /// Number of words
    pub combinations: BigUint,
    /// Characters per word
    pub positions: usize,
    /// Total UTF-8 bytes of all words, without separators
    pub word_bytes: BigUint,
}

impl WordlistEstimate {
    pub fn new(charset: &NormalizedCharset) -> Self {
        let combinations = estimate_size(charset);

        // Each character at position i appears in (combinations / |alphabet_i|) words.
        let mut word_bytes = BigUint::zero();
        if !combinations.is_zero() {
            for alphabet in charset.alphabets() {
                let bytes: usize = alphabet.iter().map(|c| c.len_utf8()).sum();
                let repeats = &combinations / BigUint::from(alphabet.len());
                word_bytes += repeats * BigUint::from(bytes);
            }
        }

        WordlistEstimate {
            combinations,
            positions: charset.positions(),
            word_bytes,
        }
    }

    /// Size of a one-word-per-line file written with `ending`.
    pub fn bytes_with_newlines(&self, ending: LineEnding) -> BigUint {
        &self.word_bytes + &self.combinations * BigUint::from(ending.as_str().len())
    }

    /// The count as a `u64`, if it fits.
    pub fn combinations_u64(&self) -> Option<u64> {
        self.combinations.to_u64()
    }
}
