//! # spectra-core
//!
//! Domain types and machine registry for the Spectra mirror pipeline.
//!
//! Load a [`machines::MachineRegistry`] to resolve a machine selector into
//! its source/destination pairs, then hand the resulting configuration to
//! the scanner and dispatcher crates.

pub mod error;
pub mod machines;
pub mod types;

pub use error::ConfigError;
pub use machines::{MachineConfig, MachineRegistry};
pub use types::{ExperimentRecord, InstrumentId, MachineName, RecencyWindow, SourcePair};
