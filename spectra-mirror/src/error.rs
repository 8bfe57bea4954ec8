//! Error types for spectra-mirror.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from copy dispatch.
///
/// A tool run that launches but fails to copy is not an error here: the
/// dispatcher logs a warning and returns whatever the output named, so
/// one failed candidate never aborts the run.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The mirror tool could not be launched at all.
    #[error("failed to launch mirror tool '{program}': {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
