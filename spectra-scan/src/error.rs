//! Error types for spectra-scan.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from scanning.
///
/// Only failure to enumerate the source root itself surfaces here;
/// unreadable subtrees below the root are skipped with a warning so the
/// remaining siblings still get scanned.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`ScanError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ScanError {
    ScanError::Io {
        path: path.into(),
        source,
    }
}
