//! Mirror-tool invocation.
//!
//! The tool is robocopy by default: bounded retries, bounded wait,
//! recursive copy, skip-if-destination-not-older, data+attributes+
//! timestamps preservation, and a verbosity profile that keeps per-file
//! paths on the output while dropping progress banners, directory lists,
//! and job headers/summaries. The dispatcher's parser depends on that
//! profile.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::MirrorError;

/// Retry count passed as `/R:n`.
const RETRIES: u32 = 2;
/// Seconds between retries, passed as `/W:n`.
const RETRY_WAIT_SECS: u32 = 5;

/// Robocopy exit codes below this value mean the run succeeded
/// (0–7 encode copy/skip/extras detail; 8+ are failures).
const FAILURE_EXIT: i32 = 8;

/// The external mirror tool and its invocation profile.
#[derive(Debug, Clone)]
pub struct MirrorTool {
    /// Program name or path; resolved through `PATH` when bare.
    pub program: PathBuf,
    pub retries: u32,
    pub retry_wait_secs: u32,
}

impl Default for MirrorTool {
    fn default() -> Self {
        Self {
            program: PathBuf::from("robocopy"),
            retries: RETRIES,
            retry_wait_secs: RETRY_WAIT_SECS,
        }
    }
}

/// Captured result of one mirror-tool run.
#[derive(Debug, Clone)]
pub struct MirrorOutput {
    pub stdout: String,
    /// Exit status below the robocopy failure threshold.
    pub success: bool,
    pub code: Option<i32>,
}

impl MirrorTool {
    /// Tool with a different program but the standard argument profile.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Argument list for mirroring `source` into `dest`.
    pub fn args(&self, source: &Path, dest: &Path) -> Vec<String> {
        vec![
            source.display().to_string(),
            dest.display().to_string(),
            "/E".to_string(),
            "/XO".to_string(),
            "/XX".to_string(),
            "/COPY:DAT".to_string(),
            format!("/R:{}", self.retries),
            format!("/W:{}", self.retry_wait_secs),
            "/TEE".to_string(),
            "/NP".to_string(),
            "/NDL".to_string(),
            "/NJH".to_string(),
            "/NJS".to_string(),
        ]
    }

    /// Run the tool once and capture its output.
    ///
    /// Only a launch failure is an error; a run that exits badly is
    /// reported through [`MirrorOutput::success`] so the caller can warn
    /// and continue with the next candidate.
    pub fn run(&self, source: &Path, dest: &Path) -> Result<MirrorOutput, MirrorError> {
        let output = Command::new(&self.program)
            .args(self.args(source, dest))
            .output()
            .map_err(|e| MirrorError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        let code = output.status.code();
        let success = code.map(|c| c < FAILURE_EXIT).unwrap_or(false);
        Ok(MirrorOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            success,
            code,
        })
    }
}
