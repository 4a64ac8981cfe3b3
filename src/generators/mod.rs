//! The interchangeable wordlist generation strategies.
//!
//! Every strategy yields exactly the same words in exactly the same order for
//! a given [`NormalizedCharset`]: odometer order, the last position varying
//! fastest. Picking one over another only trades memory for throughput.

pub mod accelerated;
pub mod eager;
pub mod errors;
pub mod product;
pub mod recursive;

use crate::core::charset::NormalizedCharset;
use crate::core::config::GenerationMethod;

pub use accelerated::{AcceleratedGenerator, AcceleratedWords};
pub use eager::EagerBuilder;
pub use errors::{GenerateError, InvalidCharsetError, UnknownMethodError};
pub use product::{ProductGenerator, ProductIter};
pub use recursive::{RecursiveGenerator, RecursiveWords};

/// Shared contract of all generation strategies.
pub trait WordGenerator {
    /// The method tag this strategy answers to.
    fn method(&self) -> GenerationMethod;

    /// Produces the wordlist for `charset`.
    fn words(&self, charset: &NormalizedCharset) -> Result<Wordlist, GenerateError>;
}

/// A lazy, single-pass word sequence from one of the streaming strategies.
#[derive(Debug, Clone)]
pub enum LazyWords {
    Product(ProductIter),
    Recursive(RecursiveWords),
    Accelerated(AcceleratedWords),
}

impl LazyWords {
    pub fn method(&self) -> GenerationMethod {
        match self {
            LazyWords::Product(_) => GenerationMethod::Iter,
            LazyWords::Recursive(_) => GenerationMethod::Words,
            LazyWords::Accelerated(_) => GenerationMethod::Accelerated,
        }
    }
}

impl Iterator for LazyWords {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self {
            LazyWords::Product(it) => it.next(),
            LazyWords::Recursive(it) => it.next(),
            LazyWords::Accelerated(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            LazyWords::Product(it) => it.size_hint(),
            LazyWords::Recursive(it) => it.size_hint(),
            LazyWords::Accelerated(it) => it.size_hint(),
        }
    }
}

impl std::iter::FusedIterator for LazyWords {}

/// The result of a generation request: either fully built or streaming.
#[derive(Debug, Clone)]
pub enum Wordlist {
    Materialized(Vec<String>),
    Lazy(LazyWords),
}

impl Wordlist {
    pub fn is_lazy(&self) -> bool {
        matches!(self, Wordlist::Lazy(_))
    }

    /// The strategy that produced this wordlist.
    pub fn strategy(&self) -> GenerationMethod {
        match self {
            Wordlist::Materialized(_) => GenerationMethod::List,
            Wordlist::Lazy(words) => words.method(),
        }
    }

    /// Exact number of words left, when known and it fits in `usize`.
    pub fn len_hint(&self) -> Option<usize> {
        match self {
            Wordlist::Materialized(words) => Some(words.len()),
            Wordlist::Lazy(words) => match words.size_hint() {
                (lower, Some(upper)) if lower == upper => Some(upper),
                _ => None,
            },
        }
    }

    /// Collects the remaining words, materializing a lazy wordlist.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Wordlist::Materialized(words) => words,
            Wordlist::Lazy(words) => words.collect(),
        }
    }
}

impl IntoIterator for Wordlist {
    type Item = String;
    type IntoIter = WordlistIter;

    fn into_iter(self) -> WordlistIter {
        match self {
            Wordlist::Materialized(words) => WordlistIter::Materialized(words.into_iter()),
            Wordlist::Lazy(words) => WordlistIter::Lazy(words),
        }
    }
}

/// Iterator over a [`Wordlist`].
#[derive(Debug)]
pub enum WordlistIter {
    Materialized(std::vec::IntoIter<String>),
    Lazy(LazyWords),
}

impl Iterator for WordlistIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self {
            WordlistIter::Materialized(it) => it.next(),
            WordlistIter::Lazy(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            WordlistIter::Materialized(it) => it.size_hint(),
            WordlistIter::Lazy(it) => it.size_hint(),
        }
    }
}

impl std::iter::FusedIterator for WordlistIter {}
