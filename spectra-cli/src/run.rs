//! One full mirror-and-log run for a selected machine.
//!
//! Strictly sequential: one source/destination pair at a time, one
//! candidate at a time, one experiment folder at a time. Configuration
//! problems abort before any scanning; everything past that point is
//! recoverable per subtree or per folder.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use spectra_core::machines;
use spectra_core::types::MachineName;
use spectra_extract::{append_at, extract, AppendResult};
use spectra_mirror::{dispatch, MirrorTool, RobocopyParser};
use spectra_scan::scan;

/// Counters for one run, printed at the end (or as JSON with `--json`).
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    machine: String,
    candidates: usize,
    copied_folders: usize,
    records_written: usize,
    records_dropped: usize,
    elapsed_secs: f64,
}

pub fn run(machine: &str, config: Option<&Path>, json: bool) -> Result<()> {
    let started = Instant::now();

    // Fatal configuration stage: nothing is scanned or copied past a bad
    // registry or an unknown selector.
    let registry = match config {
        Some(path) => machines::load_at(path),
        None => machines::load(),
    }
    .context("failed to load machine registry")?;

    let selector = MachineName::from(machine);
    let machine_cfg = registry.find(&selector)?;

    let home = dirs::home_dir().context("could not determine home directory")?;
    let log_dir = registry.log_dir_at(&home);

    let tool = registry
        .mirror_program
        .clone()
        .map(MirrorTool::with_program)
        .unwrap_or_default();
    let parser = match &registry.path_prefix {
        Some(prefix) => RobocopyParser::with_prefix(prefix.clone()),
        None => RobocopyParser::default(),
    };

    // One threshold instant for the whole run, however long it takes.
    let threshold = machine_cfg.window().threshold(Utc::now());
    let exemptions: BTreeSet<String> = machine_cfg.exempt.iter().cloned().collect();
    let instrument = machine_cfg.instrument_id();

    let mut summary = RunSummary {
        machine: machine.to_string(),
        ..RunSummary::default()
    };

    for pair in &machine_cfg.pairs {
        let candidates = match scan(&pair.source, threshold, &exemptions) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn(json, &format!("cannot scan {}: {err}", pair.source.display()));
                continue;
            }
        };
        summary.candidates += candidates.len();

        for candidate in &candidates {
            let dest = pair.dest.join(&candidate.relative);
            let copied = match dispatch(&tool, &parser, &candidate.full, &dest) {
                Ok(copied) => copied,
                Err(err) => {
                    warn(json, &err.to_string());
                    continue;
                }
            };

            if copied.is_empty() {
                warn(
                    json,
                    &format!("nothing copy-confirmed for {}", candidate.full.display()),
                );
                continue;
            }

            summary.copied_folders += copied.len();
            for folder in &copied {
                if !json {
                    println!("{}", folder.display());
                }
                let record = extract(folder, &instrument);
                match append_at(&log_dir, &record)
                    .with_context(|| format!("failed to append log for '{instrument}'"))?
                {
                    AppendResult::Written { .. } => summary.records_written += 1,
                    AppendResult::Dropped { .. } => summary.records_dropped += 1,
                }
            }
        }
    }

    summary.elapsed_secs = started.elapsed().as_secs_f64();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "✓ '{machine}' run complete ({} candidates, {} copied, {} logged, {} dropped)",
            summary.candidates,
            summary.copied_folders,
            summary.records_written,
            summary.records_dropped,
        );
        println!("elapsed: {:.1}s", summary.elapsed_secs);
    }

    Ok(())
}

fn warn(json: bool, message: &str) {
    tracing::warn!("{message}");
    if !json {
        eprintln!("{} {message}", "warning:".yellow());
    }
}
