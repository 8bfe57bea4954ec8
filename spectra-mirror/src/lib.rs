//! # spectra-mirror
//!
//! Copy dispatch: one external mirror-tool invocation per selected
//! directory, with the tool's captured output parsed into the set of
//! experiment folders it actually copied.
//!
//! The tool does the byte-level copying; this crate never copies bytes
//! itself.

pub mod dispatcher;
pub mod error;
pub mod parser;
pub mod robocopy;

pub use dispatcher::{copied_dirs, dispatch};
pub use error::MirrorError;
pub use parser::{CopyOutputParser, RobocopyParser};
pub use robocopy::{MirrorOutput, MirrorTool};
