//! Error types for spectra-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration handling.
///
/// Every variant here is fatal: configuration problems abort the run
/// before any scanning or copying starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse machine registry at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.spectra/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The registry YAML file did not exist at the expected path.
    #[error("machine registry not found at {path}")]
    RegistryNotFound { path: PathBuf },

    /// The selected machine is not present in the registry.
    #[error("unknown machine '{name}'; registered machines: {known}")]
    UnknownMachine { name: String, known: String },
}
