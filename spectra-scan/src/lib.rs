//! # spectra-scan
//!
//! Recency-based selection of changed data directories.
//!
//! Call [`scan`] with a source root, a fixed threshold instant, and the
//! exemption set to get the leaf directories that need a mirror pass.

pub mod error;
pub mod scanner;

pub use error::ScanError;
pub use scanner::{scan, Candidate};
