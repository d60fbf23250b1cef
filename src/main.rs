mod config;
mod error;
mod formats;
mod logging;
mod normalizer;
mod output;
mod remapper;
mod source;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::config::SourceRecord;
use crate::formats::Format;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Built-in registry format to produce
    #[arg(short, long, value_enum, default_value = "flare-metrics", conflicts_with = "mapping")]
    format: FormatArg,

    /// JSON file mapping canonical field names to source field names
    #[arg(short, long, value_name = "FILE")]
    mapping: Option<PathBuf>,

    /// Source records (.json object/array, or .jsonl); defaults to a built-in sample
    #[arg(short, long, value_name = "FILE")]
    source: Option<PathBuf>,

    #[arg(short, long, default_value = "stdout")]
    output: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Solidifi,
    FlareMetrics,
}

impl FormatArg {
    fn registry_name(self) -> &'static str {
        match self {
            FormatArg::Solidifi => formats::solidifi::NAME,
            FormatArg::FlareMetrics => formats::flare_metrics::NAME,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(logging::level_from_flags(args.verbose, args.quiet))?;

    let start_time = Instant::now();

    // mapping and sources are read once, before any remapping
    let format = resolve_format(&args)?;
    let sources = match &args.source {
        Some(path) => source::load(path)?,
        None => vec![SourceRecord::sample()],
    };

    let remapped = remapper::remap_all(&sources, &format);
    output::write(&args.output, format.spec.canonical_keys(), &remapped)?;

    info!(
        format = %format.name,
        records = remapped.len(),
        elapsed = ?start_time.elapsed(),
        "remap complete"
    );
    Ok(())
}

fn resolve_format(args: &Args) -> Result<Format> {
    match &args.mapping {
        Some(path) => Ok(formats::mapping_file::load(path)?),
        None => formats::builtin(args.format.registry_name()),
    }
}
