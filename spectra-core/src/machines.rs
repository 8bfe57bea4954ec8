//! YAML machine registry.
//!
//! # Storage layout
//!
//! ```text
//! ~/.spectra/
//!   machines.yaml   (one file — selector → source/destination pairs)
//!   logs/           (default audit-log directory, one file per instrument)
//! ```
//!
//! # API pattern
//!
//! Every loading function has two forms:
//! - `fn_at(path, …)` — explicit path; used in tests with `TempDir`
//! - `fn(…)` — derives the path from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{InstrumentId, MachineName, RecencyWindow, SourcePair};

// ---------------------------------------------------------------------------
// Registry types
// ---------------------------------------------------------------------------

/// Configuration for one instrument machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Selector passed on the command line.
    pub name: MachineName,

    /// Identifier stamped into log records; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_id: Option<InstrumentId>,

    /// Recency window in days for this machine's source trees.
    #[serde(default = "default_window_days")]
    pub window_days: i64,

    /// First-level folder names always descended regardless of timestamp.
    #[serde(default)]
    pub exempt: Vec<String>,

    /// Ordered source/destination pairs processed in one run.
    pub pairs: Vec<SourcePair>,
}

fn default_window_days() -> i64 {
    RecencyWindow::default().days
}

impl MachineConfig {
    /// Effective instrument identifier (explicit or derived from the selector).
    pub fn instrument_id(&self) -> InstrumentId {
        self.instrument_id
            .clone()
            .unwrap_or_else(|| InstrumentId(self.name.0.clone()))
    }

    /// Effective recency window.
    pub fn window(&self) -> RecencyWindow {
        RecencyWindow {
            days: self.window_days,
        }
    }
}

/// Root of the machine registry YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineRegistry {
    pub version: u32,

    /// Directory for per-instrument audit logs; defaults to
    /// `<home>/.spectra/logs` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Mirror tool program override; defaults to `robocopy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror_program: Option<PathBuf>,

    /// Path marker that starts a copied path on a tool output line;
    /// defaults to the UNC prefix `\\`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,

    #[serde(default)]
    pub machines: Vec<MachineConfig>,
}

impl MachineRegistry {
    /// Resolve a machine selector.
    ///
    /// An unknown selector is a fatal configuration error; the message
    /// lists the registered names so the operator can correct the call.
    pub fn find(&self, name: &MachineName) -> Result<&MachineConfig, ConfigError> {
        self.machines
            .iter()
            .find(|m| &m.name == name)
            .ok_or_else(|| ConfigError::UnknownMachine {
                name: name.0.clone(),
                known: self
                    .machines
                    .iter()
                    .map(|m| m.name.0.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Effective audit-log directory.
    pub fn log_dir_at(&self, home: &Path) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| home.join(".spectra").join("logs"))
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.spectra/machines.yaml` — pure, no I/O.
pub fn registry_path_at(home: &Path) -> PathBuf {
    home.join(".spectra").join("machines.yaml")
}

/// `registry_path_at` convenience wrapper (uses `dirs::home_dir()`).
pub fn registry_path() -> Result<PathBuf, ConfigError> {
    Ok(registry_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load the machine registry from an explicit path.
///
/// Returns `ConfigError::RegistryNotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<MachineRegistry, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::RegistryNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `load_at` convenience wrapper against the default registry path.
pub fn load() -> Result<MachineRegistry, ConfigError> {
    load_at(&registry_path_at(&home()?))
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
