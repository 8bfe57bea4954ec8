//! Domain types for the Spectra mirror pipeline.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. Configuration-facing types are serializable via serde + serde_yaml.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed machine selector, as passed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineName(pub String);

impl fmt::Display for MachineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for MachineName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MachineName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed instrument identifier, used to name the audit log file
/// and stamped into every record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentId(pub String);

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Configuration structs
// ---------------------------------------------------------------------------

/// One source tree and the destination it mirrors to.
///
/// Pairing source and destination in one struct ties the two together; an
/// index mismatch between separate lists cannot occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePair {
    /// Absolute path to the instrument's data root.
    pub source: PathBuf,
    /// Absolute path to the mirror destination root.
    pub dest: PathBuf,
}

/// How far back a directory's modification time may lie before its subtree
/// is considered unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecencyWindow {
    pub days: i64,
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self { days: 3 }
    }
}

impl RecencyWindow {
    /// The fixed cutoff instant for one run: `now - days`.
    ///
    /// Computed once per run and passed down, so a long run compares every
    /// directory against the same instant.
    pub fn threshold(&self, now: DateTime<Utc>) -> SystemTime {
        let cutoff = now - ChronoDuration::days(self.days);
        let secs = cutoff.timestamp().max(0) as u64;
        UNIX_EPOCH + Duration::new(secs, cutoff.timestamp_subsec_nanos())
    }
}

// ---------------------------------------------------------------------------
// Experiment record
// ---------------------------------------------------------------------------

/// Metadata extracted from one mirrored experiment folder.
///
/// Extracted fields are `Option<String>`: `None` means "not obtained"
/// (missing file, absent pattern, unreadable path). A record may only be
/// logged when every field is present; partial records are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    /// Absolute path of the experiment folder at the destination.
    pub folder_path: PathBuf,
    pub solvent: Option<String>,
    pub nucleus: Option<String>,
    pub acq_points: Option<String>,
    pub proc_points: Option<String>,
    pub instrument_id: InstrumentId,
    /// Formatted `yyyy/MM/dd HH:mm:ss`, from the pre-acquisition marker file.
    pub started_at: Option<String>,
    /// Formatted `yyyy/MM/dd HH:mm:ss`, from the raw data file.
    pub finished_at: Option<String>,
}

impl ExperimentRecord {
    /// Names of the fields that were not obtained, in log-column order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if field_missing(&self.solvent) {
            missing.push("solvent");
        }
        if field_missing(&self.nucleus) {
            missing.push("nucleus");
        }
        if field_missing(&self.acq_points) {
            missing.push("acq_points");
        }
        if field_missing(&self.proc_points) {
            missing.push("proc_points");
        }
        if field_missing(&self.started_at) {
            missing.push("started_at");
        }
        if field_missing(&self.finished_at) {
            missing.push("finished_at");
        }
        missing
    }

    /// True when every field carries a value and the record may be logged.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

fn field_missing(field: &Option<String>) -> bool {
    match field {
        Some(value) => value.is_empty(),
        None => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
