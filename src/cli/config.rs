use std::error::Error;
use std::fmt;
use tracing_subscriber::EnvFilter;
use wlgen::{Charset, GenerationMethod, LineEnding, WlgenConfig};

/// Installs the stderr log subscriber. `RUST_LOG` wins over the flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let default = if quiet {
        "wlgen=error"
    } else {
        match verbose {
            0 => "wlgen=warn",
            1 => "wlgen=info",
            _ => "wlgen=debug",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Layers command line flags over the loaded config.
pub fn apply_flags(
    config: &mut WlgenConfig,
    method: Option<GenerationMethod>,
    memory_efficient: bool,
    skip_validation: bool,
    line_ending: Option<LineEnding>,
) {
    if let Some(method) = method {
        config.generator.method = method;
    }
    if memory_efficient {
        config.generator.prefer_memory_efficient = true;
    }
    if skip_validation {
        config.generator.skip_validation = true;
    }
    if let Some(line_ending) = line_ending {
        config.output.line_ending = line_ending;
    }
}

/// A `@name` that matches no preset.
#[derive(Debug)]
pub struct PresetNotFoundError {
    name: String,
    suggestion: Option<String>,
}

impl fmt::Display for PresetNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: charset preset '@{}' not found", self.name)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nhint: did you mean '@{}'?", suggestion)?;
        } else {
            write!(f, "\n\nhint: run `wlgen --list` to see available presets")?;
        }
        Ok(())
    }
}

impl Error for PresetNotFoundError {}

/// Turns the positional arguments into a charset.
///
/// Each argument is one position, except `@name`, which expands to every
/// position of that preset in place.
pub fn resolve_charset(config: &WlgenConfig, args: &[String]) -> Result<Charset, Box<dyn Error>> {
    let mut specs: Vec<&str> = Vec::with_capacity(args.len());

    for arg in args {
        match arg.strip_prefix('@') {
            Some(name) => {
                let preset = config.preset(name).ok_or_else(|| {
                    let available: Vec<&str> = config.charsets.keys().map(String::as_str).collect();
                    PresetNotFoundError {
                        name: name.to_string(),
                        suggestion: wlgen::generators::errors::find_closest_name(name, &available),
                    }
                })?;
                specs.extend(preset.positions.iter().map(String::as_str));
            }
            None => specs.push(arg),
        }
    }

    Ok(Charset::parse_positions(specs)?)
}
