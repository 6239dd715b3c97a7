//! relopt CLI
//!
//! Thin wrapper around the optimizer library: reads one input file with
//! schema declarations and a query, strips `--` comment lines, and prints
//! the trace document (or its JSON form).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use relopt::utils::{Helpers, Logger};

#[derive(Parser)]
#[command(name = "relopt")]
#[command(version = relopt::VERSION)]
#[command(about = "Heuristic query optimizer with rule-by-rule trace output", long_about = None)]
struct Cli {
    /// Input file: schema declarations followed by one query statement
    input: PathBuf,

    /// Emit the structured trace as JSON instead of the text document
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress diagnostics for dropped or unbound input units
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        Logger::level_from_verbosity(cli.verbose)
    };
    Logger::init_with_level(level);

    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let input = Helpers::strip_comments(&raw);

    let outcome = relopt::optimize(&input)?;

    for diagnostic in &outcome.trace.diagnostics {
        log::warn!("{}", diagnostic);
    }

    if cli.json {
        println!("{}", outcome.trace.to_json()?);
    } else {
        println!("{}", outcome.document);
    }

    Ok(())
}
