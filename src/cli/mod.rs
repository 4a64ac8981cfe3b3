mod commands;
mod config;

use clap::Parser;
use std::path::PathBuf;
use wlgen::{GenerationMethod, LineEnding, WlgenConfig};

use config::{apply_flags, init_logging, resolve_charset};

#[derive(Parser)]
#[command(name = "wlgen")]
#[command(version)]
#[command(about = "Wordlist generator: every combination of one character per position, in odometer order", long_about = None)]
struct Cli {
    /// Characters for each position, first to last (ranges, ?l ?u ?d ?s ?h ?a classes, @preset)
    #[arg(value_name = "POSITION", required_unless_present_any = ["capabilities", "list"])]
    positions: Vec<String>,

    /// Generation method: auto, list, iter, words, accelerated
    #[arg(short = 'm', long, value_name = "METHOD")]
    method: Option<String>,

    /// Prefer a streaming method in auto mode
    #[arg(long)]
    memory_efficient: bool,

    /// Trust the charset as given (no sorting, deduplication or checks)
    #[arg(long)]
    skip_validation: bool,

    /// Write words to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Line terminator: native, lf, crlf
    #[arg(long, value_name = "ENDING")]
    line_ending: Option<String>,

    /// Stop after N words
    #[arg(short = 'n', long, value_name = "N")]
    limit: Option<u64>,

    /// Print the number of words and the output size, then exit
    #[arg(long)]
    estimate: bool,

    /// Show whether the accelerated method can run on this machine
    #[arg(long)]
    capabilities: bool,

    /// List charset presets usable as @name
    #[arg(short = 'l', long)]
    list: bool,

    /// Extra config file, layered over the standard locations
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config_path = cli
        .config
        .as_deref()
        .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()));
    let mut config = WlgenConfig::load_with_overrides(config_path.as_deref())?;

    if cli.capabilities {
        return commands::show_capabilities();
    }

    if cli.list {
        commands::list_presets(&config);
        return Ok(());
    }

    let method = cli
        .method
        .as_deref()
        .map(str::parse::<GenerationMethod>)
        .transpose()?;
    let line_ending = cli
        .line_ending
        .as_deref()
        .map(str::parse::<LineEnding>)
        .transpose()?;
    apply_flags(
        &mut config,
        method,
        cli.memory_efficient,
        cli.skip_validation,
        line_ending,
    );

    let charset = resolve_charset(&config, &cli.positions)?;

    if cli.estimate {
        return commands::show_estimate(&config, &charset);
    }

    commands::generate_to(&config, &charset, cli.output.as_deref(), cli.limit)
}
