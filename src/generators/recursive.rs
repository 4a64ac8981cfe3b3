//! Recursive generator: depth-first descent, one frame per position.
//!
//! The descent is driven by an explicit stack of per-position cursors instead
//! of native recursion, so very long words cannot exhaust the call stack.
//! The prefix chosen by the enclosing frames is kept in a single buffer and
//! extended or trimmed by one character as frames are pushed and popped.
//! Slower than [`ProductIter`](super::ProductIter), which it matches word for
//! word.

use super::errors::GenerateError;
use super::{LazyWords, WordGenerator, Wordlist};
use crate::core::charset::NormalizedCharset;
use crate::core::config::GenerationMethod;
use std::iter::FusedIterator;

#[derive(Debug, Clone)]
pub struct RecursiveWords {
    alphabets: Vec<Vec<char>>,
    /// Next character index to try, one cursor per open frame
    cursors: Vec<usize>,
    /// Characters chosen by every frame below the top one
    prefix: String,
    remaining: Option<usize>,
}

impl RecursiveWords {
    pub fn new(charset: &NormalizedCharset) -> Self {
        let alphabets = charset.alphabets().to_vec();
        let remaining = if charset.is_empty_product() {
            Some(0)
        } else {
            alphabets
                .iter()
                .try_fold(1usize, |acc, a| acc.checked_mul(a.len()))
        };
        let cursors = if alphabets.is_empty() {
            Vec::new()
        } else {
            let mut cursors = Vec::with_capacity(alphabets.len());
            cursors.push(0);
            cursors
        };

        RecursiveWords {
            prefix: String::with_capacity(alphabets.len() * 4),
            alphabets,
            cursors,
            remaining,
        }
    }

    /// Number of frames currently open.
    pub fn depth(&self) -> usize {
        self.cursors.len()
    }
}

impl Iterator for RecursiveWords {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let last = self.alphabets.len().checked_sub(1)?;

        loop {
            let depth = self.cursors.len().checked_sub(1)?;
            let cursor = self.cursors[depth];
            let alphabet = &self.alphabets[depth];

            if cursor == alphabet.len() {
                // frame exhausted: return to the parent, dropping its current choice
                self.cursors.pop();
                if !self.cursors.is_empty() {
                    self.prefix.pop();
                }
                continue;
            }

            let c = alphabet[cursor];
            self.cursors[depth] += 1;

            if depth == last {
                let mut word = String::with_capacity(self.prefix.len() + c.len_utf8());
                word.push_str(&self.prefix);
                word.push(c);
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                return Some(word);
            }

            self.prefix.push(c);
            self.cursors.push(0);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for RecursiveWords {}

/// Strategy handle for the recursive generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveGenerator;

impl WordGenerator for RecursiveGenerator {
    fn method(&self) -> GenerationMethod {
        GenerationMethod::Words
    }

    fn words(&self, charset: &NormalizedCharset) -> Result<Wordlist, GenerateError> {
        Ok(Wordlist::Lazy(LazyWords::Recursive(RecursiveWords::new(
            charset,
        ))))
    }
}
