//! Strategy selection.
//!
//! The dispatcher turns a raw charset and a [`GeneratorConfig`] into a
//! [`Wordlist`]. An explicit method is honored verbatim and fails loudly if it
//! cannot run; `auto` estimates the size and picks the eager builder for small
//! inputs and the product iterator otherwise. The dispatcher holds no state
//! between calls and never enumerates anything itself.

use crate::core::charset::{Charset, NormalizedCharset, normalize};
use crate::core::config::{GenerationMethod, GeneratorConfig};
use crate::estimate::estimate_size;
use crate::generators::errors::{GenerateError, InvalidCharsetError};
use crate::generators::{
    AcceleratedGenerator, EagerBuilder, ProductGenerator, RecursiveGenerator, WordGenerator,
    Wordlist,
};
use crate::simd::Capabilities;
use num_bigint::BigUint;

#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: GeneratorConfig,
    capabilities: Capabilities,
}

impl Dispatcher {
    /// Creates a dispatcher, probing the host's capabilities once.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_capabilities(config, Capabilities::probe())
    }

    /// Creates a dispatcher with a known probe result.
    pub fn with_capabilities(config: GeneratorConfig, capabilities: Capabilities) -> Self {
        Dispatcher {
            config,
            capabilities,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Normalizes `raw`, or wraps it as-is when validation is skipped.
    pub fn prepare(&self, raw: &Charset) -> Result<NormalizedCharset, InvalidCharsetError> {
        if self.config.skip_validation {
            Ok(NormalizedCharset::assume_clean(raw))
        } else {
            normalize(raw)
        }
    }

    /// Resolves `auto` to a concrete method for `charset`.
    ///
    /// Explicit methods are returned unchanged, whether or not they can run.
    pub fn select(&self, charset: &NormalizedCharset) -> GenerationMethod {
        if self.config.method != GenerationMethod::Auto {
            return self.config.method;
        }

        if self.config.prefer_accelerated {
            if self.capabilities.accelerated_available() {
                return GenerationMethod::Accelerated;
            }
            tracing::debug!("accelerated generator unavailable, falling back");
        }

        if self.config.prefer_memory_efficient {
            return GenerationMethod::Iter;
        }

        let size = estimate_size(charset);
        if self.is_small(&size) {
            GenerationMethod::List
        } else {
            GenerationMethod::Iter
        }
    }

    fn is_small(&self, size: &BigUint) -> bool {
        let threshold = self
            .config
            .small_threshold
            .min(self.config.max_eager_combinations.saturating_add(1));
        *size < BigUint::from(threshold)
    }

    /// The strategy object for a concrete method.
    pub fn strategy(&self, method: GenerationMethod) -> Box<dyn WordGenerator> {
        match method {
            GenerationMethod::List => {
                Box::new(EagerBuilder::with_limit(self.config.max_eager_combinations))
            }
            GenerationMethod::Iter | GenerationMethod::Auto => Box::new(ProductGenerator),
            GenerationMethod::Words => Box::new(RecursiveGenerator),
            GenerationMethod::Accelerated => Box::new(
                AcceleratedGenerator::new(self.capabilities.clone())
                    .batch_size(self.config.batch_size),
            ),
        }
    }

    /// Produces the wordlist for an already prepared charset.
    pub fn dispatch(&self, charset: &NormalizedCharset) -> Result<Wordlist, GenerateError> {
        let method = self.select(charset);
        tracing::debug!(
            requested = %self.config.method,
            selected = %method,
            positions = charset.positions(),
            "dispatching wordlist generation"
        );
        self.strategy(method).words(charset)
    }

    /// Prepares `raw` and produces its wordlist.
    pub fn generate(&self, raw: &Charset) -> Result<Wordlist, GenerateError> {
        let charset = self.prepare(raw)?;
        self.dispatch(&charset)
    }
}

/// Generates a wordlist with the given configuration.
///
/// ```
/// use wlgen::{Charset, GeneratorConfig, generate};
///
/// let charset = Charset::new().position(0, "123").position(1, "ABC");
/// let words: Vec<String> = generate(&charset, &GeneratorConfig::default())
///     .unwrap()
///     .into_iter()
///     .collect();
///
/// assert_eq!(words, ["1A", "1B", "1C", "2A", "2B", "2C", "3A", "3B", "3C"]);
/// ```
pub fn generate(raw: &Charset, config: &GeneratorConfig) -> Result<Wordlist, GenerateError> {
    Dispatcher::new(config.clone()).generate(raw)
}
