//! Dataset discovery
//!
//! Datasets are laid out one directory level deep: `<root>/<subdir>/<file>.<ext>`.
//! Files directly under the root, anything nested deeper and hidden files (names
//! starting with `.`, such as `._*.nc` resource forks) are ignored.

use crate::errors::{ClimCompError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Collect every file with `extension` inside the immediate subdirectories of `root`.
///
/// The returned list is sorted so that downstream floating-point accumulation happens
/// in the same order on every run.
///
/// # Errors
///
/// Returns an I/O error if `root` or one of its subdirectories cannot be read, and
/// [`ClimCompError::NoDatasets`] if no matching file exists.
pub fn find_dataset_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(root)? {
        let subdir = entry?.path();
        if !subdir.is_dir() {
            continue;
        }

        for inner in fs::read_dir(&subdir)? {
            let path = inner?.path();
            if path.is_file() && !is_hidden(&path) && has_extension(&path, extension) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(ClimCompError::NoDatasets {
            path: root.to_path_buf(),
        });
    }

    files.sort();
    debug!("Located {} .{} files under {}", files.len(), extension, root.display());
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}
