//! Accelerated generator: words in bulk, one batch at a time.
//!
//! The positions are split into an outer prefix and an inner block. The inner
//! block is the longest run of trailing positions whose product fits in one
//! batch; it is enumerated once, up front, by broadcasting index columns
//! (each position's digit pattern is a run fill tiled across the block with
//! bulk copies) and gathering characters from those columns. Every batch is
//! then one outer prefix glued onto every precomputed suffix, so per-word
//! work is two memcpys. The outer prefixes come from a [`ProductIter`].
//!
//! Available only when the capability probe reports a usable vector unit;
//! explicit requests fail with [`GenerateError::UnsupportedMethod`] otherwise.

use super::errors::GenerateError;
use super::product::ProductIter;
use super::{LazyWords, WordGenerator, Wordlist};
use crate::core::charset::NormalizedCharset;
use crate::core::config::{DEFAULT_BATCH_SIZE, GenerationMethod};
use crate::simd::Capabilities;
use std::iter::FusedIterator;

#[derive(Debug, Clone)]
pub struct AcceleratedWords {
    suffixes: Vec<String>,
    prefixes: Prefixes,
    batch: std::vec::IntoIter<String>,
    remaining: Option<usize>,
}

#[derive(Debug, Clone)]
enum Prefixes {
    /// Every position is in the inner block; one empty prefix
    Single(bool),
    Outer(ProductIter),
}

impl AcceleratedWords {
    /// Callers outside this module go through [`AcceleratedGenerator`], which checks capabilities.
    pub(crate) fn new(charset: &NormalizedCharset, batch_size: usize) -> Self {
        let remaining = if charset.is_empty_product() {
            Some(0)
        } else {
            charset
                .radices()
                .try_fold(1usize, |acc, n| acc.checked_mul(n))
        };

        if charset.is_empty_product() {
            return AcceleratedWords {
                suffixes: Vec::new(),
                prefixes: Prefixes::Single(true),
                batch: Vec::new().into_iter(),
                remaining,
            };
        }

        let alphabets = charset.alphabets();
        let split = inner_split(alphabets, batch_size.max(1));
        let (outer, inner) = alphabets.split_at(split);

        let radices: Vec<usize> = inner.iter().map(|a| a.len()).collect();
        let columns = broadcast_columns(&radices);
        let suffixes = gather_words(inner, &columns);

        let prefixes = if outer.is_empty() {
            Prefixes::Single(false)
        } else {
            Prefixes::Outer(ProductIter::from_alphabets(outer.to_vec()))
        };

        tracing::trace!(
            outer = outer.len(),
            inner = inner.len(),
            block = suffixes.len(),
            "accelerated generator split"
        );

        AcceleratedWords {
            suffixes,
            prefixes,
            batch: Vec::new().into_iter(),
            remaining,
        }
    }

    /// Words produced per batch.
    pub fn block_len(&self) -> usize {
        self.suffixes.len()
    }

    fn next_prefix(&mut self) -> Option<String> {
        match &mut self.prefixes {
            Prefixes::Single(done) => {
                if *done {
                    None
                } else {
                    *done = true;
                    Some(String::new())
                }
            }
            Prefixes::Outer(it) => it.next(),
        }
    }

    fn fill_batch(&self, prefix: &str) -> Vec<String> {
        let mut batch = Vec::with_capacity(self.suffixes.len());
        for suffix in &self.suffixes {
            let mut word = String::with_capacity(prefix.len() + suffix.len());
            word.push_str(prefix);
            word.push_str(suffix);
            batch.push(word);
        }
        batch
    }
}

impl Iterator for AcceleratedWords {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(word) = self.batch.next() {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                return Some(word);
            }
            let prefix = self.next_prefix()?;
            self.batch = self.fill_batch(&prefix).into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (self.batch.len(), None),
        }
    }
}

impl FusedIterator for AcceleratedWords {}

/// Index of the first inner position: trailing positions are pulled into the
/// inner block while their product stays within `batch_size`. The last
/// position is always inner.
fn inner_split(alphabets: &[Vec<char>], batch_size: usize) -> usize {
    let mut split = alphabets.len().saturating_sub(1);
    let mut block = alphabets.last().map_or(1, |a| a.len());

    while split > 0 {
        match block.checked_mul(alphabets[split - 1].len()) {
            Some(next) if next <= batch_size => {
                block = next;
                split -= 1;
            }
            _ => break,
        }
    }

    split
}

/// Digit columns of the inner block in odometer order.
///
/// Column `k` holds, for every row, the index into position `k`'s alphabet.
/// One period of a column is each digit repeated `stride` times; the period
/// is then tiled across the block by doubling copies.
fn broadcast_columns(radices: &[usize]) -> Vec<Vec<u32>> {
    let block: usize = radices.iter().product();
    let mut columns = Vec::with_capacity(radices.len());
    let mut stride = block;

    for &radix in radices {
        stride /= radix;
        let period = radix * stride;
        let mut column = vec![0u32; block];

        for (digit, run) in column[..period].chunks_exact_mut(stride).enumerate() {
            run.fill(digit as u32);
        }

        let mut filled = period;
        while filled < block {
            let n = filled.min(block - filled);
            column.copy_within(..n, filled);
            filled += n;
        }

        columns.push(column);
    }

    columns
}

/// Turns index columns back into words.
fn gather_words(alphabets: &[Vec<char>], columns: &[Vec<u32>]) -> Vec<String> {
    let rows = columns.first().map_or(0, |c| c.len());
    let mut words = Vec::with_capacity(rows);

    for row in 0..rows {
        let word: String = alphabets
            .iter()
            .zip(columns)
            .map(|(alphabet, column)| alphabet[column[row] as usize])
            .collect();
        words.push(word);
    }

    words
}

/// Strategy handle for the accelerated generator, gated by a capability probe.
#[derive(Debug, Clone)]
pub struct AcceleratedGenerator {
    capabilities: Capabilities,
    batch_size: usize,
}

impl AcceleratedGenerator {
    pub fn new(capabilities: Capabilities) -> Self {
        AcceleratedGenerator {
            capabilities,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn is_available(&self) -> bool {
        self.capabilities.accelerated_available()
    }

    /// Starts the batch iterator, or reports why it cannot run here.
    pub fn iter(&self, charset: &NormalizedCharset) -> Result<AcceleratedWords, GenerateError> {
        if let Some(reason) = self.capabilities.unavailable_reason() {
            tracing::warn!(reason = %reason, "accelerated generator requested but unavailable");
            return Err(GenerateError::UnsupportedMethod {
                method: GenerationMethod::Accelerated,
                reason,
            });
        }
        Ok(AcceleratedWords::new(charset, self.batch_size))
    }
}

impl WordGenerator for AcceleratedGenerator {
    fn method(&self) -> GenerationMethod {
        GenerationMethod::Accelerated
    }

    fn words(&self, charset: &NormalizedCharset) -> Result<Wordlist, GenerateError> {
        self.iter(charset)
            .map(|words| Wordlist::Lazy(LazyWords::Accelerated(words)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::charset::{Charset, normalize};

    fn normalized(positions: &[&str]) -> NormalizedCharset {
        normalize(&Charset::from_positions(positions.iter().copied())).unwrap()
    }

    fn available() -> Capabilities {
        Capabilities {
            arch: "test",
            vector_features: vec!["AVX2"],
            simd_compiled: true,
        }
    }

    #[test]
    fn test_broadcast_columns() {
        let columns = broadcast_columns(&[2, 3]);
        assert_eq!(columns[0], vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(columns[1], vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_broadcast_columns_uneven_tiling() {
        let columns = broadcast_columns(&[3, 2, 2]);
        assert_eq!(columns[1], vec![0, 0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1]);
        assert_eq!(columns[2], vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_inner_split() {
        let alphabets = vec![vec!['a'; 10], vec!['b'; 10], vec!['c'; 10]];
        assert_eq!(inner_split(&alphabets, 100), 1);
        assert_eq!(inner_split(&alphabets, 1000), 0);
        // the last position is always inner, even when it alone exceeds the batch
        assert_eq!(inner_split(&alphabets, 5), 2);
    }

    #[test]
    fn test_odometer_order() {
        let words: Vec<String> = AcceleratedWords::new(&normalized(&["123", "ABC"]), 4).collect();
        assert_eq!(
            words,
            vec!["1A", "1B", "1C", "2A", "2B", "2C", "3A", "3B", "3C"]
        );
    }

    #[test]
    fn test_matches_product_iter_across_batch_sizes() {
        let charset = normalized(&["abc", "12", "XYZW", "!?"]);
        let expected: Vec<String> = ProductIter::new(&charset).collect();

        for batch_size in [1, 2, 3, 7, 8, 64, 4096] {
            let words: Vec<String> = AcceleratedWords::new(&charset, batch_size).collect();
            assert_eq!(words, expected, "batch size {}", batch_size);
        }
    }

    #[test]
    fn test_size_hint() {
        let mut words = AcceleratedWords::new(&normalized(&["ab", "cd", "ef"]), 2);
        assert_eq!(words.block_len(), 2);
        assert_eq!(words.size_hint(), (8, Some(8)));
        words.next();
        assert_eq!(words.size_hint(), (7, Some(7)));
    }

    #[test]
    fn test_early_stop_fills_one_batch() {
        let charset = normalized(&["0123456789"; 12]);
        let mut words = AcceleratedWords::new(&charset, 1000);
        let first: Vec<String> = words.by_ref().take(3).collect();

        assert_eq!(first[2], "000000000002");
        match &words.prefixes {
            Prefixes::Outer(outer) => assert_eq!(outer.produced(), 1),
            Prefixes::Single(_) => panic!("expected an outer prefix iterator"),
        }
    }

    #[test]
    fn test_unavailable_is_rejected() {
        let generator = AcceleratedGenerator::new(Capabilities::unavailable());
        let err = generator.words(&normalized(&["ab"])).unwrap_err();

        assert!(matches!(
            err,
            GenerateError::UnsupportedMethod {
                method: GenerationMethod::Accelerated,
                ..
            }
        ));
    }

    #[test]
    fn test_available_is_lazy() {
        let generator = AcceleratedGenerator::new(available()).batch_size(2);
        let wordlist = generator.words(&normalized(&["ab", "cd"])).unwrap();

        assert!(wordlist.is_lazy());
        assert_eq!(wordlist.strategy(), GenerationMethod::Accelerated);
        assert_eq!(wordlist.into_vec(), vec!["ac", "ad", "bc", "bd"]);
    }

    #[test]
    fn test_empty_product() {
        let hole = NormalizedCharset::assume_clean(&Charset::from_positions(["ab", ""]));
        assert_eq!(AcceleratedWords::new(&hole, 16).count(), 0);
    }
}
