//! Spectra — incremental instrument-data mirror with experiment audit log.
//!
//! # Usage
//!
//! ```text
//! spectra <machine> [--config <path>] [--json]
//! ```
//!
//! Designed to run every few minutes from a scheduler: each run selects
//! the recently-changed sample directories on the machine's source trees,
//! mirrors them, and appends one audit-log line per completed experiment.

mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "spectra",
    version,
    about = "Mirror recently-changed instrument data and log experiment metadata",
    long_about = None,
)]
struct Cli {
    /// Machine selector, as registered in the machine registry.
    machine: String,

    /// Machine registry path (default: ~/.spectra/machines.yaml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a machine-readable run summary instead of per-path lines.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run::run(&cli.machine, cli.config.as_deref(), cli.json)
}
