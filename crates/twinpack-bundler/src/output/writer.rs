//! Safe file writing for emitted assets.
//!
//! - **Path validation**: every target is resolved under the output directory;
//!   `..` components that escape it are rejected.
//! - **Atomic writes**: content goes to `<target>.tmp` first and is renamed
//!   into place once every file of the batch has been written.
//! - **Rollback**: if any write fails, the temp files written so far are
//!   removed and nothing is renamed.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::warn;

use crate::{Error, Result};

/// Write a batch of files under `dir`, all or nothing.
///
/// `files` pairs a path relative to `dir` with its content. Returns the
/// absolute paths written, in input order.
pub fn write_files_to(dir: &Path, files: &[(String, Vec<u8>)]) -> Result<Vec<PathBuf>> {
    let dir = validate_and_normalize_dir(dir)?;

    fs::create_dir_all(&dir).map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut operations = Vec::with_capacity(files.len());
    for (filename, content) in files {
        let target_path = validate_output_path(&dir, filename)?;
        operations.push((target_path, content.as_slice()));
    }

    write_files_atomic(&operations)?;

    Ok(operations.into_iter().map(|(path, _)| path).collect())
}

/// Resolve `dir` to a clean absolute path.
pub(crate) fn validate_and_normalize_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.clean();

    let absolute = if cleaned.is_absolute() {
        cleaned
    } else {
        std::env::current_dir()
            .map_err(|e| {
                Error::InvalidOutputPath(format!("Failed to get current directory: {}", e))
            })?
            .join(&cleaned)
            .clean()
    };

    Ok(absolute)
}

/// Resolve `filename` under `base_dir`, rejecting paths that leave it.
pub(crate) fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let filename_path = Path::new(filename).clean();
    let full_path = base_dir.join(&filename_path).clean();

    if !full_path.starts_with(base_dir) || full_path == base_dir {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            filename,
            base_dir.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}

/// `app.js` -> `app.js.tmp`; keeps temp names distinct for `app.js` and `app.css`.
fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(OsString::from(".tmp"));
    PathBuf::from(name)
}

fn write_files_atomic(operations: &[(PathBuf, &[u8])]) -> Result<()> {
    let mut temp_files = Vec::new();

    // Phase 1: temp files
    for (target_path, content) in operations {
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                cleanup_temp_files(&temp_files);
                Error::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = temp_path_for(target_path);
        fs::write(&temp_path, content).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to write temporary file '{}': {}",
                temp_path.display(),
                e
            ))
        })?;

        temp_files.push((temp_path, target_path.clone()));
    }

    // Phase 2: rename into place
    for (temp_path, target_path) in &temp_files {
        fs::rename(temp_path, target_path).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to rename '{}' to '{}': {}",
                temp_path.display(),
                target_path.display(),
                e
            ))
        })?;
    }

    Ok(())
}

fn cleanup_temp_files(temp_files: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in temp_files {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(temp_path) {
                warn!(
                    path = %temp_path.display(),
                    error = %e,
                    "Failed to clean up temporary file"
                );
            }
        }
    }
}
