//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use wlgen::prelude::*;
//!
//! let charset = normalize(&Charset::from_positions(["ab", "cd"])).unwrap();
//! let words: Vec<String> = gen_wordlist_iter(&charset).collect();
//! assert_eq!(words, ["ac", "ad", "bc", "bd"]);
//! ```

pub use crate::{
    Capabilities, Charset, Dispatcher, GenerateError, GenerationMethod, GeneratorConfig,
    InvalidCharsetError, LineEnding, NormalizedCharset, WordGenerator, Wordlist,
    WordlistEstimate, WordlistWriter, estimate_size, gen_accelerated, gen_wordlist,
    gen_wordlist_iter, gen_words, generate, normalize,
};
