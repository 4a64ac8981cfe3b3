//! Lazy product iterator: a multi-radix counter over the alphabets.
//!
//! Holds one index per position. Each step reads the current word and then
//! advances the counter like an odometer, carrying from the last position
//! towards the first. This is the throughput baseline for streaming.

use super::errors::GenerateError;
use super::{LazyWords, WordGenerator, Wordlist};
use crate::core::charset::NormalizedCharset;
use crate::core::config::GenerationMethod;
use std::iter::FusedIterator;

#[derive(Debug, Clone)]
pub struct ProductIter {
    alphabets: Vec<Vec<char>>,
    indices: Vec<usize>,
    exhausted: bool,
    /// Total words, if it fits in `usize`
    total: Option<usize>,
    produced: u64,
}

impl ProductIter {
    pub fn new(charset: &NormalizedCharset) -> Self {
        Self::from_alphabets(charset.alphabets().to_vec())
    }

    /// Alphabets must already be in canonical form.
    pub(crate) fn from_alphabets(alphabets: Vec<Vec<char>>) -> Self {
        let empty_product = alphabets.is_empty() || alphabets.iter().any(|a| a.is_empty());
        let total = if empty_product {
            Some(0)
        } else {
            alphabets
                .iter()
                .try_fold(1usize, |acc, a| acc.checked_mul(a.len()))
        };

        ProductIter {
            indices: vec![0; alphabets.len()],
            exhausted: empty_product,
            total,
            alphabets,
            produced: 0,
        }
    }

    /// Words yielded so far.
    pub fn produced(&self) -> u64 {
        self.produced
    }

    /// Current counter state, one index per position.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.alphabets[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for ProductIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }

        let word: String = self
            .indices
            .iter()
            .zip(&self.alphabets)
            .map(|(&i, alphabet)| alphabet[i])
            .collect();

        self.advance();
        self.produced += 1;
        Some(word)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.total {
            Some(total) => {
                let remaining = total - self.produced as usize;
                (remaining, Some(remaining))
            }
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for ProductIter {}

/// Strategy handle for the product iterator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductGenerator;

impl WordGenerator for ProductGenerator {
    fn method(&self) -> GenerationMethod {
        GenerationMethod::Iter
    }

    fn words(&self, charset: &NormalizedCharset) -> Result<Wordlist, GenerateError> {
        Ok(Wordlist::Lazy(LazyWords::Product(ProductIter::new(charset))))
    }
}
