//! Wordlist generation: every word formed by picking one character per
//! position, in odometer order.
//!
//! ```
//! use wlgen::{Charset, GeneratorConfig, estimate_size, generate, normalize};
//!
//! let charset = Charset::new().position(0, "123").position(1, "ABC");
//! assert_eq!(estimate_size(&normalize(&charset).unwrap()), 9u32.into());
//!
//! let words: Vec<String> = generate(&charset, &GeneratorConfig::default())
//!     .unwrap()
//!     .into_iter()
//!     .take(3)
//!     .collect();
//! assert_eq!(words, ["1A", "1B", "1C"]);
//! ```

pub mod core;
mod dispatch;
pub mod estimate;
pub mod generators;
pub mod output;
pub mod prelude;
pub mod simd;

pub use crate::core::charset::{Charset, NormalizedCharset, normalize};
pub use crate::core::config::{GenerationMethod, GeneratorConfig, PresetConfig, WlgenConfig};
pub use dispatch::{Dispatcher, generate};
pub use estimate::{WordlistEstimate, estimate_raw_size, estimate_size};
pub use generators::{
    AcceleratedGenerator, AcceleratedWords, EagerBuilder, GenerateError, InvalidCharsetError,
    LazyWords, ProductIter, RecursiveWords, UnknownMethodError, WordGenerator, Wordlist,
    WordlistIter,
};
pub use output::{LineEnding, WordlistWriter, WriteSummary};
pub use simd::Capabilities;

/// Builds the whole wordlist in memory (eager builder, default size limit).
pub fn gen_wordlist(charset: &NormalizedCharset) -> Result<Vec<String>, GenerateError> {
    EagerBuilder::new().build(charset)
}

/// Streams the wordlist with the odometer product iterator.
pub fn gen_wordlist_iter(charset: &NormalizedCharset) -> ProductIter {
    ProductIter::new(charset)
}

/// Streams the wordlist with the cursor-stack recursive generator.
pub fn gen_words(charset: &NormalizedCharset) -> RecursiveWords {
    RecursiveWords::new(charset)
}

/// Streams the wordlist in batches, if `capabilities` allow it.
pub fn gen_accelerated(
    charset: &NormalizedCharset,
    capabilities: &Capabilities,
) -> Result<AcceleratedWords, GenerateError> {
    AcceleratedGenerator::new(capabilities.clone()).iter(charset)
}

#[cfg(test)]
mod tests;
