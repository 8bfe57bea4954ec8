//! Per-folder metadata extraction.

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use spectra_core::types::{ExperimentRecord, InstrumentId};

use crate::params::{bracketed, last_token, line_with, nth_token};

/// Timestamp format used in log records.
const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Extract the metadata record for one copied experiment folder.
///
/// Never fails: a missing file, an absent pattern, or an access error
/// leaves the affected field unset. Validation happens at append time,
/// so one unreadable folder cannot abort its siblings.
pub fn extract(folder: &Path, instrument_id: &InstrumentId) -> ExperimentRecord {
    let acqu = read_lenient(&folder.join("acqu"));
    let proc = read_lenient(&folder.join("pdata").join("1").join("proc"));

    ExperimentRecord {
        folder_path: folder.to_path_buf(),
        solvent: acqu
            .as_deref()
            .and_then(|c| line_with(c, "SOLVENT=", None))
            .and_then(bracketed)
            .map(str::to_string),
        nucleus: acqu
            .as_deref()
            .and_then(|c| line_with(c, "NUC1=", None))
            .and_then(bracketed)
            .map(str::to_string),
        acq_points: acqu
            .as_deref()
            .and_then(|c| line_with(c, "TD=", Some("NusTD=")))
            .and_then(last_token)
            .map(str::to_string),
        proc_points: proc
            .as_deref()
            .and_then(|c| line_with(c, "FTSIZE=", None))
            .and_then(|line| nth_token(line, 1))
            .map(str::to_string),
        instrument_id: instrument_id.clone(),
        // Marker written immediately before acquisition starts.
        started_at: mtime_formatted(&folder.join("precom.output")),
        // Raw data file, written when acquisition finishes.
        finished_at: mtime_formatted(&folder.join("fid")),
    }
}

fn read_lenient(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(err) => {
            tracing::debug!("cannot read {}: {err}", path.display());
            None
        }
    }
}

fn mtime_formatted(path: &Path) -> Option<String> {
    let mtime = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(format_time(mtime))
}

/// `yyyy/MM/dd HH:mm:ss` in local time.
pub fn format_time(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format(TIME_FORMAT).to_string()
}
