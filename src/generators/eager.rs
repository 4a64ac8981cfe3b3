//! Eager builder: the complete wordlist in memory.
//!
//! Builds bottom-up, starting from the last position and prefixing each
//! earlier position's characters onto the words built so far. Fastest for
//! small inputs, but time and memory grow with the combination count and
//! nothing is observable until the whole list exists.

use super::errors::GenerateError;
use super::{WordGenerator, Wordlist};
use crate::core::charset::NormalizedCharset;
use crate::core::config::{DEFAULT_MAX_EAGER_COMBINATIONS, GenerationMethod};
use crate::estimate::estimate_size;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EagerBuilder {
    max_combinations: u64,
}

impl Default for EagerBuilder {
    fn default() -> Self {
        EagerBuilder {
            max_combinations: DEFAULT_MAX_EAGER_COMBINATIONS,
        }
    }
}

impl EagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to build more than `max_combinations` words.
    pub fn with_limit(max_combinations: u64) -> Self {
        EagerBuilder { max_combinations }
    }

    pub fn limit(&self) -> u64 {
        self.max_combinations
    }

    /// Builds every word, or fails before allocating if the count exceeds the limit.
    pub fn build(&self, charset: &NormalizedCharset) -> Result<Vec<String>, GenerateError> {
        let count = estimate_size(charset);
        let capacity = match count.to_u64() {
            Some(n) if n <= self.max_combinations => n.to_usize(),
            _ => None,
        };

        let Some(capacity) = capacity else {
            tracing::warn!(
                count = %count,
                limit = self.max_combinations,
                "eager builder refused oversized wordlist"
            );
            return Err(GenerateError::TooLarge {
                count,
                limit: self.max_combinations,
            });
        };

        let words = build_words(charset.alphabets());
        debug_assert_eq!(words.len(), capacity);
        Ok(words)
    }

    /// Whether `count` words fit under this builder's limit.
    pub fn accepts(&self, count: &BigUint) -> bool {
        *count <= BigUint::from(self.max_combinations)
    }
}

impl WordGenerator for EagerBuilder {
    fn method(&self) -> GenerationMethod {
        GenerationMethod::List
    }

    fn words(&self, charset: &NormalizedCharset) -> Result<Wordlist, GenerateError> {
        self.build(charset).map(Wordlist::Materialized)
    }
}

fn build_words(alphabets: &[Vec<char>]) -> Vec<String> {
    let Some((last, rest)) = alphabets.split_last() else {
        return Vec::new();
    };

    let mut words: Vec<String> = last.iter().map(|c| c.to_string()).collect();
    for alphabet in rest.iter().rev() {
        let mut prefixed = Vec::with_capacity(alphabet.len() * words.len());
        for &head in alphabet {
            for tail in &words {
                let mut word = String::with_capacity(head.len_utf8() + tail.len());
                word.push(head);
                word.push_str(tail);
                prefixed.push(word);
            }
        }
        words = prefixed;
    }

    words
}
