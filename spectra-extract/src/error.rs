//! Error types for spectra-extract.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from audit-log writes.
///
/// Extraction itself never errors: a missing file or absent pattern
/// leaves the affected field unset, and validation drops the record.
#[derive(Debug, Error)]
pub enum LogError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`LogError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> LogError {
    LogError::Io {
        path: path.into(),
        source,
    }
}
