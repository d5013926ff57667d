//! Filesystem utilities for distship.

use std::path::{Path, PathBuf};

use crate::error::UtilError;

/// Collect every file under `dir`, recursively, sorted by path.
///
/// Directory entries are not returned; they only drive recursion. The sort
/// keeps archive layouts deterministic across platforms.
///
/// # Errors
/// Returns an error if `dir` or any subdirectory cannot be read.
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, UtilError> {
    let mut files = Vec::new();
    collect_files_recursive(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files_recursive(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), UtilError> {
    let entries = std::fs::read_dir(dir).map_err(|source| UtilError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| UtilError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_files_recursive(&path, out)?;
        } else {
            out.push(path);
        }
    }

    Ok(())
}
