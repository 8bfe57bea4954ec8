//! Copied-path extraction from mirror-tool output.
//!
//! The parser is coupled to one specific tool's verbosity profile, so it
//! lives behind [`CopyOutputParser`]; an alternate mirror tool supplies
//! its own implementation without touching the dispatcher.

/// Extracts the copied directory named on one line of mirror-tool output.
pub trait CopyOutputParser {
    /// The directory a copied file landed in, if this line names one.
    fn copied_dir(&self, line: &str) -> Option<String>;
}

/// Parser for robocopy's verbose per-file lines.
///
/// A copy line carries a column prefix (action, size) followed by the
/// file's full path, which starts with the network-path marker `\\`.
/// The copied directory is the substring from that marker up to the last
/// path separator on the line.
#[derive(Debug, Clone)]
pub struct RobocopyParser {
    path_prefix: String,
}

impl Default for RobocopyParser {
    fn default() -> Self {
        Self {
            path_prefix: r"\\".to_string(),
        }
    }
}

impl RobocopyParser {
    /// Parser recognizing paths that start with `path_prefix` instead of
    /// the UNC marker. Used when the mirrored roots are local mounts.
    pub fn with_prefix(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
        }
    }
}

impl CopyOutputParser for RobocopyParser {
    fn copied_dir(&self, line: &str) -> Option<String> {
        let line = line.trim_end();
        let start = line.find(&self.path_prefix)?;
        let tail = &line[start..];

        // Cut at the last separator: the remainder is the file name, the
        // kept part is the directory it was copied into.
        let cut = tail.rfind(['\\', '/'])?;
        if cut < self.path_prefix.len() {
            return None;
        }
        Some(tail[..cut].to_string())
    }
}
