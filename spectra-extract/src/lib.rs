//! # spectra-extract
//!
//! Metadata extraction from mirrored experiment folders and the
//! append-only per-instrument audit log.
//!
//! Call [`extract`] per copied folder, then [`logbook::append_at`] to
//! persist complete records; incomplete records are dropped, never
//! partially written.

pub mod error;
pub mod logbook;
pub mod params;
pub mod record;

pub use error::LogError;
pub use logbook::{append_at, log_path_at, AppendResult};
pub use record::extract;
