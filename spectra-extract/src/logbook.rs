//! Append-only per-instrument audit log.
//!
//! One file per instrument identifier, one comma-joined line per complete
//! record, field order `{folder, solvent, nucleus, acq_points,
//! proc_points, instrument, started, finished}`. The file is created on
//! first append and never rewritten in place.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use spectra_core::types::{ExperimentRecord, InstrumentId};

use crate::error::{io_err, LogError};

/// Outcome of one append attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendResult {
    /// The record was complete and one line was appended.
    Written { path: PathBuf },
    /// The record was incomplete and dropped; names the unset fields.
    Dropped { missing: Vec<&'static str> },
}

/// `<log_dir>/<instrument_id>.log` — pure, no I/O.
pub fn log_path_at(log_dir: &Path, instrument: &InstrumentId) -> PathBuf {
    log_dir.join(format!("{}.log", instrument.0))
}

/// Validate and append one record to the instrument's log.
///
/// Incomplete records are dropped with a warning naming the unset fields;
/// nothing partial is ever written. The line is assembled in memory and
/// appended with a single write.
pub fn append_at(log_dir: &Path, record: &ExperimentRecord) -> Result<AppendResult, LogError> {
    let missing = record.missing_fields();
    if !missing.is_empty() {
        tracing::warn!(
            "dropping record for {}: missing {}",
            record.folder_path.display(),
            missing.join(", ")
        );
        return Ok(AppendResult::Dropped { missing });
    }

    std::fs::create_dir_all(log_dir).map_err(|e| io_err(log_dir, e))?;
    let path = log_path_at(log_dir, &record.instrument_id);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| io_err(&path, e))?;
    file.write_all(log_line(record).as_bytes())
        .map_err(|e| io_err(&path, e))?;

    tracing::info!("logged: {}", record.folder_path.display());
    Ok(AppendResult::Written { path })
}

/// One unquoted comma-joined line, trailing newline included.
fn log_line(record: &ExperimentRecord) -> String {
    let fields = [
        record.folder_path.display().to_string(),
        record.solvent.clone().unwrap_or_default(),
        record.nucleus.clone().unwrap_or_default(),
        record.acq_points.clone().unwrap_or_default(),
        record.proc_points.clone().unwrap_or_default(),
        record.instrument_id.to_string(),
        record.started_at.clone().unwrap_or_default(),
        record.finished_at.clone().unwrap_or_default(),
    ];
    let mut line = fields.join(",");
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    fn record(folder: &str) -> ExperimentRecord {
        ExperimentRecord {
            folder_path: PathBuf::from(folder),
            solvent: Some("CDCl3".to_string()),
            nucleus: Some("1H".to_string()),
            acq_points: Some("65536".to_string()),
            proc_points: Some("131072".to_string()),
            instrument_id: InstrumentId::from("AV700"),
            started_at: Some("2024/03/01 09:15:00".to_string()),
            finished_at: Some("2024/03/01 09:42:11".to_string()),
        }
    }

    #[test]
    fn first_append_creates_file_with_one_line() {
        let dir = TempDir::new().expect("tempdir");
        let logs = dir.path().join("logs");

        let result = append_at(&logs, &record("/mirror/a/10")).expect("append");
        let path = log_path_at(&logs, &InstrumentId::from("AV700"));
        assert_eq!(result, AppendResult::Written { path: path.clone() });

        let contents = fs::read_to_string(&path).expect("read log");
        assert_eq!(
            contents,
            "/mirror/a/10,CDCl3,1H,65536,131072,AV700,2024/03/01 09:15:00,2024/03/01 09:42:11\n"
        );
    }

    #[test]
    fn appends_preserve_order_and_existing_content() {
        let dir = TempDir::new().expect("tempdir");
        let logs = dir.path().join("logs");
        fs::create_dir_all(&logs).expect("mkdir");
        let path = log_path_at(&logs, &InstrumentId::from("AV700"));
        fs::write(&path, "preexisting line\n").expect("seed log");

        append_at(&logs, &record("/mirror/a/10")).expect("append 1");
        append_at(&logs, &record("/mirror/b/20")).expect("append 2");

        let contents = fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "preexisting line");
        assert!(lines[1].starts_with("/mirror/a/10,"));
        assert!(lines[2].starts_with("/mirror/b/20,"));
    }

    #[test]
    fn incomplete_record_is_dropped_without_touching_disk() {
        let dir = TempDir::new().expect("tempdir");
        let logs = dir.path().join("logs");

        let mut incomplete = record("/mirror/c/30");
        incomplete.proc_points = None;
        let result = append_at(&logs, &incomplete).expect("append");
        assert_eq!(
            result,
            AppendResult::Dropped {
                missing: vec!["proc_points"]
            }
        );
        assert!(!logs.exists(), "dropped records must not create the log");
    }

    #[test]
    fn log_line_has_eight_fields_in_order() {
        let line = log_line(&record("/mirror/a/10"));
        let fields: Vec<&str> = line.trim_end().split(',').collect();
        assert_eq!(
            fields,
            vec![
                "/mirror/a/10",
                "CDCl3",
                "1H",
                "65536",
                "131072",
                "AV700",
                "2024/03/01 09:15:00",
                "2024/03/01 09:42:11",
            ]
        );
    }
}
