//! Recursive file copying for templates, overlays and remote examples

use crate::error::TemplateError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How to treat files that already exist at the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Fail with [`TemplateError::DestinationExists`] on any collision
    NoOverwrite,
    /// Replace colliding files, keep everything else in place
    Overwrite,
}

/// Copy a file or a directory tree from `source` to `dest`
///
/// Directories are merged into `dest` (created if missing). Files keep their
/// modification time where the filesystem allows it. Returns the copied files
/// relative to `source` (a single file yields its own name).
pub fn copy_tree(source: &Path, dest: &Path, mode: CopyMode) -> Result<Vec<PathBuf>, TemplateError> {
    let metadata = fs::metadata(source)
        .map_err(|_| TemplateError::MissingTemplateSource(source.to_path_buf()))?;

    if !metadata.is_dir() {
        copy_file(source, dest, mode)?;
        let name = source.file_name().map(PathBuf::from).unwrap_or_default();
        return Ok(vec![name]);
    }

    fs::create_dir_all(dest)
        .map_err(|e| TemplateError::io(format!("Failed to create directory {}", dest.display()), e))?;

    let mut copied_files = Vec::new();

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let context = format!("Failed to read {}", source.display());
            TemplateError::io(context, e.into())
        })?;

        let relative_path = entry
            .path()
            .strip_prefix(source)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
        let target_path = dest.join(&relative_path);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target_path).map_err(|e| {
                TemplateError::io(
                    format!("Failed to create directory {}", target_path.display()),
                    e,
                )
            })?;
        } else if file_type.is_file() {
            copy_file(entry.path(), &target_path, mode)?;
            copied_files.push(relative_path);
        } else {
            tracing::debug!(path = %entry.path().display(), "skipping non-regular file");
        }
    }

    Ok(copied_files)
}

fn copy_file(source: &Path, dest: &Path, mode: CopyMode) -> Result<(), TemplateError> {
    if mode == CopyMode::NoOverwrite && fs::symlink_metadata(dest).is_ok() {
        return Err(TemplateError::DestinationExists(dest.to_path_buf()));
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TemplateError::io(format!("Failed to create directory {}", parent.display()), e)
        })?;
    }

    fs::copy(source, dest).map_err(|e| {
        TemplateError::io(
            format!("Failed to copy {} to {}", source.display(), dest.display()),
            e,
        )
    })?;

    preserve_mtime(source, dest);
    Ok(())
}

/// Best effort: read-only destinations or exotic filesystems keep the copy time
fn preserve_mtime(source: &Path, dest: &Path) {
    let Ok(modified) = fs::metadata(source).and_then(|m| m.modified()) else {
        return;
    };
    if let Ok(file) = fs::File::options().write(true).open(dest) {
        let _ = file.set_modified(modified);
    }
}
