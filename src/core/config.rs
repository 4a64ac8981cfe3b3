use crate::generators::errors::{UnknownMethodError, find_closest_name};
use crate::output::LineEnding;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Below this many combinations, `auto` materializes the wordlist.
pub const DEFAULT_SMALL_THRESHOLD: u64 = 100_000;

/// Hard ceiling for the eager builder, regardless of how it was selected.
pub const DEFAULT_MAX_EAGER_COMBINATIONS: u64 = 5_000_000;

/// Number of words the accelerated generator aims to produce per batch.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Which generation strategy to run.
///
/// All strategies produce the same words in the same order; the choice only
/// affects memory use and throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Pick a strategy from the estimated size and the caller's preferences
    #[default]
    Auto,
    /// Eager builder: the full wordlist in memory
    List,
    /// Lazy product iterator (odometer)
    Iter,
    /// Recursive generator driven by an explicit cursor stack
    Words,
    /// Batch generator, requires the `simd` feature and a vector unit
    Accelerated,
}

impl GenerationMethod {
    pub const ALL: [GenerationMethod; 5] = [
        GenerationMethod::Auto,
        GenerationMethod::List,
        GenerationMethod::Iter,
        GenerationMethod::Words,
        GenerationMethod::Accelerated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMethod::Auto => "auto",
            GenerationMethod::List => "list",
            GenerationMethod::Iter => "iter",
            GenerationMethod::Words => "words",
            GenerationMethod::Accelerated => "accelerated",
        }
    }

    /// True for strategies that yield words without materializing them.
    pub fn is_lazy(&self) -> bool {
        matches!(
            self,
            GenerationMethod::Iter | GenerationMethod::Words | GenerationMethod::Accelerated
        )
    }
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMethod {
    type Err = UnknownMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let method = match name.as_str() {
            "auto" => GenerationMethod::Auto,
            "list" | "eager" => GenerationMethod::List,
            "iter" | "product" | "lazy" => GenerationMethod::Iter,
            "words" | "recursive" => GenerationMethod::Words,
            "accelerated" | "simd" => GenerationMethod::Accelerated,
            _ => {
                let names: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
                let suggestion = find_closest_name(&name, &names);
                return Err(UnknownMethodError::new(s, suggestion));
            }
        };
        Ok(method)
    }
}

/// Options that steer the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Explicit strategy, or `auto`
    pub method: GenerationMethod,
    /// Force a lazy strategy even for small inputs
    pub prefer_memory_efficient: bool,
    /// Skip normalization; the caller asserts the charset is already clean
    pub skip_validation: bool,
    /// Let `auto` pick the accelerated generator when the CPU supports it
    pub prefer_accelerated: bool,
    /// `auto` materializes below this many combinations
    pub small_threshold: u64,
    /// The eager builder refuses to materialize more than this
    pub max_eager_combinations: u64,
    /// Words per accelerated batch
    pub batch_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            method: GenerationMethod::Auto,
            prefer_memory_efficient: false,
            skip_validation: false,
            prefer_accelerated: false,
            small_threshold: DEFAULT_SMALL_THRESHOLD,
            max_eager_combinations: DEFAULT_MAX_EAGER_COMBINATIONS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl GeneratorConfig {
    pub fn with_method(mut self, method: GenerationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn memory_efficient(mut self, prefer: bool) -> Self {
        self.prefer_memory_efficient = prefer;
        self
    }

    pub fn skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    pub fn prefer_accelerated(mut self, prefer: bool) -> Self {
        self.prefer_accelerated = prefer;
        self
    }

    pub fn small_threshold(mut self, threshold: u64) -> Self {
        self.small_threshold = threshold;
        self
    }

    pub fn max_eager_combinations(mut self, limit: u64) -> Self {
        self.max_eager_combinations = limit;
        self
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    fn apply(&mut self, overrides: GeneratorOverrides) {
        if let Some(method) = overrides.method {
            self.method = method;
        }
        if let Some(v) = overrides.prefer_memory_efficient {
            self.prefer_memory_efficient = v;
        }
        if let Some(v) = overrides.skip_validation {
            self.skip_validation = v;
        }
        if let Some(v) = overrides.prefer_accelerated {
            self.prefer_accelerated = v;
        }
        if let Some(v) = overrides.small_threshold {
            self.small_threshold = v;
        }
        if let Some(v) = overrides.max_eager_combinations {
            self.max_eager_combinations = v;
        }
        if let Some(v) = overrides.batch_size {
            self.batch_size = v.max(1);
        }
    }
}

/// Output settings for the wordlist writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub line_ending: LineEnding,
}

/// A named charset preset, one spec string per position.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PresetConfig {
    pub positions: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fully resolved settings after layering every config source.
#[derive(Debug, Clone, Default)]
pub struct WlgenConfig {
    pub generator: GeneratorConfig,
    pub output: OutputConfig,
    pub charsets: HashMap<String, PresetConfig>,
}

/// One config file as written on disk; every field may be omitted.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    generator: GeneratorOverrides,
    #[serde(default)]
    output: OutputOverrides,
    #[serde(default)]
    charsets: HashMap<String, PresetConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct GeneratorOverrides {
    method: Option<GenerationMethod>,
    prefer_memory_efficient: Option<bool>,
    skip_validation: Option<bool>,
    prefer_accelerated: Option<bool>,
    small_threshold: Option<u64>,
    max_eager_combinations: Option<u64>,
    batch_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct OutputOverrides {
    line_ending: Option<LineEnding>,
}

impl WlgenConfig {
    /// Parses a config file and layers it over the built-in defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let mut config = WlgenConfig::default();
        config.merge_toml(content)?;
        Ok(config)
    }

    /// Built-in defaults and presets.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../../wlgen.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Layers a config file from disk over this config.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        self.merge_toml(&content)?;
        Ok(())
    }

    fn merge_toml(&mut self, content: &str) -> Result<(), toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        self.generator.apply(file.generator);
        if let Some(line_ending) = file.output.line_ending {
            self.output.line_ending = line_ending;
        }
        self.charsets.extend(file.charsets);
        Ok(())
    }

    /// Load configuration with user overrides from standard locations
    /// 1. Start with built-in defaults
    /// 2. Override with ~/.config/wlgen/config.toml if it exists
    /// 3. Override with ./wlgen.toml if it exists in current directory
    /// 4. Override with `explicit` if given (errors here are fatal)
    pub fn load_with_overrides(explicit: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("wlgen").join("config.toml");
            if user_config_path.exists()
                && let Err(e) = config.merge_file(&user_config_path)
            {
                tracing::warn!(path = ?user_config_path, error = %e, "failed to load user config");
            }
        }

        let local_config_path = Path::new("wlgen.toml");
        if local_config_path.exists()
            && let Err(e) = config.merge_file(local_config_path)
        {
            tracing::warn!(path = ?local_config_path, error = %e, "failed to load local config");
        }

        if let Some(path) = explicit {
            config
                .merge_file(path)
                .map_err(|e| format!("Cannot load config '{}': {}", path.display(), e))?;
        }

        Ok(config)
    }

    pub fn preset(&self, name: &str) -> Option<&PresetConfig> {
        self.charsets.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!("auto".parse::<GenerationMethod>().unwrap(), GenerationMethod::Auto);
        assert_eq!("LIST".parse::<GenerationMethod>().unwrap(), GenerationMethod::List);
        assert_eq!(" iter ".parse::<GenerationMethod>().unwrap(), GenerationMethod::Iter);
        assert_eq!("recursive".parse::<GenerationMethod>().unwrap(), GenerationMethod::Words);
        assert_eq!("simd".parse::<GenerationMethod>().unwrap(), GenerationMethod::Accelerated);
    }

    #[test]
    fn test_method_from_str_suggests() {
        let err = "itre".parse::<GenerationMethod>().unwrap_err();
        assert_eq!(err.name, "itre");
        assert_eq!(err.suggestion.as_deref(), Some("iter"));
    }

    #[test]
    fn test_method_laziness() {
        assert!(!GenerationMethod::List.is_lazy());
        assert!(!GenerationMethod::Auto.is_lazy());
        assert!(GenerationMethod::Iter.is_lazy());
        assert!(GenerationMethod::Words.is_lazy());
        assert!(GenerationMethod::Accelerated.is_lazy());
    }

    #[test]
    fn test_load_default() {
        let config = WlgenConfig::load_default().unwrap();

        assert_eq!(config.generator, GeneratorConfig::default());
        assert_eq!(config.output.line_ending, LineEnding::Native);
        assert!(config.preset("digits").is_some());
        assert!(config.preset("hex").is_some());
    }

    #[test]
    fn test_partial_override_keeps_other_fields() {
        let mut config = WlgenConfig::load_default().unwrap();
        config
            .merge_toml(
                r#"
                [generator]
                method = "words"

                [output]
                line_ending = "crlf"

                [charsets.pin]
                positions = ["0-9", "0-9", "0-9", "0-9"]
                "#,
            )
            .unwrap();

        assert_eq!(config.generator.method, GenerationMethod::Words);
        assert_eq!(config.generator.small_threshold, DEFAULT_SMALL_THRESHOLD);
        assert_eq!(config.output.line_ending, LineEnding::Crlf);
        assert_eq!(config.preset("pin").unwrap().positions.len(), 4);
        assert!(config.preset("digits").is_some());
    }

    #[test]
    fn test_rejects_unknown_method_in_file() {
        assert!(WlgenConfig::from_toml("[generator]\nmethod = \"quantum\"\n").is_err());
    }

    #[test]
    fn test_batch_size_never_zero() {
        assert_eq!(GeneratorConfig::default().batch_size(0).batch_size, 1);
    }
}
