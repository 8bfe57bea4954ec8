//! Per-candidate copy dispatch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::MirrorError;
use crate::parser::CopyOutputParser;
use crate::robocopy::MirrorTool;

/// Path component marking instrument-generated post-processing folders.
/// Those are not original experiments and never produce log records.
const PROCESSING_MARKER: &str = "pdata";

/// Mirror one selected directory and return the experiment folders the
/// tool reported as copied.
///
/// The returned set is fresh per call: deduplicated in first-seen order,
/// with processing-output folders dropped. A tool run that exits badly
/// logs a warning and still yields whatever its output named — a
/// candidate that entirely failed to copy simply yields an empty set.
pub fn dispatch(
    tool: &MirrorTool,
    parser: &dyn CopyOutputParser,
    source: &Path,
    dest: &Path,
) -> Result<Vec<PathBuf>, MirrorError> {
    let output = tool.run(source, dest)?;
    if !output.success {
        tracing::warn!(
            "mirror tool exited with {:?} for {}; no records for this candidate",
            output.code,
            source.display()
        );
    }
    Ok(copied_dirs(parser, &output.stdout))
}

/// Parse captured tool output into the copied-folder set.
///
/// Deduplicates in first-seen order and drops any path containing the
/// processing-output marker as a component.
pub fn copied_dirs(parser: &dyn CopyOutputParser, stdout: &str) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut dirs = Vec::new();
    for line in stdout.lines() {
        let Some(dir) = parser.copied_dir(line) else {
            continue;
        };
        if has_processing_marker(&dir) {
            continue;
        }
        if seen.insert(dir.clone()) {
            dirs.push(PathBuf::from(dir));
        }
    }
    dirs
}

/// True when any path component equals the processing-output marker.
fn has_processing_marker(path: &str) -> bool {
    path.split(['\\', '/'])
        .any(|component| component == PROCESSING_MARKER)
}
