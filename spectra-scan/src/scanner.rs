//! Recency scanner.
//!
//! Walks a source root two to three levels deep and selects the leaf
//! directories whose subtrees changed since the threshold instant.
//!
//! The source filesystem only bumps a directory's modification time when
//! an entry is created directly inside it; a new sample folder under an
//! existing user folder does not touch the user folder's timestamp.
//! Exempt and four-digit-year first-level folders are therefore always
//! opened one extra level, so stale-looking ancestors cannot hide new
//! leaves underneath them.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{io_err, ScanError};

/// A directory selected as needing a mirror pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path relative to the source root; joined onto the destination root
    /// by the dispatcher.
    pub relative: PathBuf,
    /// Absolute path under the source root.
    pub full: PathBuf,
    /// Levels below the source root: 2 for ordinary folders, 3 below
    /// exempt or year-named folders.
    pub depth: u8,
}

/// Select the recently-changed leaf directories under `source_root`.
///
/// `threshold` is the fixed per-run cutoff; directories with modification
/// time strictly before it are considered unchanged. `exemptions` holds
/// the first-level names always descended regardless of timestamp; names
/// that are exactly four ASCII digits are implicitly exempt.
///
/// Candidates are produced in directory-enumeration order. Unreadable
/// subtrees below the root are skipped with a warning.
pub fn scan(
    source_root: &Path,
    threshold: SystemTime,
    exemptions: &BTreeSet<String>,
) -> Result<Vec<Candidate>, ScanError> {
    let mut candidates = Vec::new();

    let first_level = subdirs(source_root).map_err(|e| io_err(source_root, e))?;
    for (dir1, name1) in first_level {
        let always_descend = exemptions.contains(&name1) || is_year_name(&name1);

        if always_descend {
            // Two extra levels, ignoring the first-level timestamp entirely.
            for (dir2, name2) in subdirs_lenient(&dir1) {
                if !is_recent(&dir2, threshold) {
                    continue;
                }
                for (dir3, name3) in subdirs_lenient(&dir2) {
                    if !is_recent(&dir3, threshold) {
                        continue;
                    }
                    candidates.push(Candidate {
                        relative: PathBuf::from(&name1).join(&name2).join(&name3),
                        full: dir3,
                        depth: 3,
                    });
                }
            }
            continue;
        }

        if !is_recent(&dir1, threshold) {
            tracing::debug!("unchanged, skipping subtree: {}", dir1.display());
            continue;
        }

        for (dir2, name2) in subdirs_lenient(&dir1) {
            if !is_recent(&dir2, threshold) {
                continue;
            }
            candidates.push(Candidate {
                relative: PathBuf::from(&name1).join(&name2),
                full: dir2,
                depth: 2,
            });
        }
    }

    Ok(candidates)
}

/// Exactly four ASCII digits, e.g. `2024`.
fn is_year_name(name: &str) -> bool {
    name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit())
}

/// Modification time at or after the threshold.
///
/// An unreadable timestamp counts as not recent: the subtree is skipped
/// with a warning and siblings continue.
fn is_recent(path: &Path, threshold: SystemTime) -> bool {
    let modified = std::fs::metadata(path).and_then(|m| m.modified());
    match modified {
        Ok(mtime) => mtime >= threshold,
        Err(err) => {
            tracing::warn!("cannot read mtime of {}: {err}", path.display());
            false
        }
    }
}

/// Subdirectories of `path` with their names, in enumeration order.
/// Non-directory entries and entries with unreadable types are ignored.
fn subdirs(path: &Path) -> std::io::Result<Vec<(PathBuf, String)>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        dirs.push((entry.path(), name));
    }
    Ok(dirs)
}

/// `subdirs`, but an unreadable directory yields an empty list plus a
/// warning instead of an error.
fn subdirs_lenient(path: &Path) -> Vec<(PathBuf, String)> {
    match subdirs(path) {
        Ok(dirs) => dirs,
        Err(err) => {
            tracing::warn!("cannot enumerate {}: {err}", path.display());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_names_are_four_digits() {
        assert!(is_year_name("2024"));
        assert!(is_year_name("1999"));
        assert!(!is_year_name("202"));
        assert!(!is_year_name("20245"));
        assert!(!is_year_name("20a4"));
        assert!(!is_year_name(""));
    }

    #[test]
    fn missing_path_is_not_recent() {
        let path = Path::new("/definitely/not/here");
        assert!(!is_recent(path, SystemTime::UNIX_EPOCH));
    }

    #[test]
    fn subdirs_lenient_swallows_missing_dir() {
        let path = Path::new("/definitely/not/here");
        assert!(subdirs_lenient(path).is_empty());
    }
}
