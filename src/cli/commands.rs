use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use wlgen::{Capabilities, Charset, Dispatcher, WlgenConfig, WordlistEstimate, WordlistWriter};

/// Print the capability probe.
pub fn show_capabilities() -> Result<(), Box<dyn std::error::Error>> {
    let capabilities = Capabilities::probe();
    println!("{}", capabilities.display());
    if let Some(reason) = capabilities.unavailable_reason() {
        println!("reason: {}", reason);
    }
    Ok(())
}

/// Print every preset, sorted by name.
pub fn list_presets(config: &WlgenConfig) {
    println!("Available presets:\n");
    let mut presets: Vec<_> = config.charsets.iter().collect();
    presets.sort_by_key(|(name, _)| *name);

    for (name, preset) in presets {
        let positions = preset.positions.join(" ");
        match &preset.description {
            Some(description) => println!("  @{:<12} {:<24} {}", name, positions, description),
            None => println!("  @{:<12} {}", name, positions),
        }
    }
}

/// Print the word count and the size of the output file, without generating.
pub fn show_estimate(
    config: &WlgenConfig,
    charset: &Charset,
) -> Result<(), Box<dyn std::error::Error>> {
    let dispatcher = Dispatcher::new(config.generator.clone());
    let normalized = dispatcher.prepare(charset)?;
    let estimate = WordlistEstimate::new(&normalized);

    println!("words: {}", estimate.combinations);
    println!("length: {}", estimate.positions);
    println!(
        "bytes: {}",
        estimate.bytes_with_newlines(config.output.line_ending)
    );
    println!("method: {}", dispatcher.select(&normalized));
    Ok(())
}

/// Generate the wordlist and write it to `output` (stdout if `None`).
pub fn generate_to(
    config: &WlgenConfig,
    charset: &Charset,
    output: Option<&Path>,
    limit: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let wordlist = Dispatcher::new(config.generator.clone()).generate(charset)?;

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path)
                .map_err(|e| format!("Cannot create '{}': {}", path.display(), e))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = WordlistWriter::new(sink)
        .line_ending(config.output.line_ending)
        .limit(limit);

    let written = writer
        .write_words(wordlist)
        .and_then(|_| writer.finish());

    match written {
        Ok(summary) => {
            tracing::info!(
                words = summary.words,
                bytes = summary.bytes,
                "wordlist written"
            );
            Ok(())
        }
        // The reader went away (e.g. `| head`); nothing left to do.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}
