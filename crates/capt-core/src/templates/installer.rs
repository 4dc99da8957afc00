//! Executes a [`TemplateInstallPlan`]
//!
//! The base template is copied strictly: every destination entry must be
//! absent. Overlays are then merged in plan order with overwrites allowed.

use super::copier::{copy_tree, CopyMode};
use super::plan::TemplateInstallPlan;
use crate::error::TemplateError;
use std::fs;
use std::path::{Path, PathBuf};

/// Base entries renamed on copy; packaging layers tend to drop dotfiles
const RENAMED_ENTRIES: &[(&str, &str)] = &[("gitignore", ".gitignore")];

/// Destination name for a base template entry
pub fn destination_name(entry: &str) -> &str {
    RENAMED_ENTRIES
        .iter()
        .find(|(from, _)| *from == entry)
        .map_or(entry, |&(_, to)| to)
}

/// Lay down the base template and overlays in `target_dir`
///
/// Returns every copied file relative to `target_dir`, in copy order.
pub fn install_plan(
    target_dir: &Path,
    plan: &TemplateInstallPlan,
) -> Result<Vec<PathBuf>, TemplateError> {
    fs::create_dir_all(target_dir).map_err(|e| {
        TemplateError::io(
            format!("Failed to create target directory {}", target_dir.display()),
            e,
        )
    })?;

    // Check every base destination before copying anything
    for entry in plan.base.copy_entries {
        let destination = target_dir.join(destination_name(entry));
        if fs::symlink_metadata(&destination).is_ok() {
            return Err(TemplateError::DestinationExists(destination));
        }
    }

    let mut copied_files = Vec::new();

    for entry in plan.base.copy_entries {
        let source_path = plan.base.source_dir.join(entry);
        let destination_entry = destination_name(entry);
        let destination_path = target_dir.join(destination_entry);

        tracing::debug!(entry, destination = %destination_path.display(), "copying base entry");
        let copied = copy_tree(&source_path, &destination_path, CopyMode::NoOverwrite)?;

        if source_path.is_dir() {
            copied_files.extend(copied.into_iter().map(|p| Path::new(destination_entry).join(p)));
        } else {
            copied_files.push(PathBuf::from(destination_entry));
        }
    }

    for overlay in &plan.overlays {
        if !overlay.source_dir.is_dir() {
            return Err(TemplateError::MissingOverlay {
                name: overlay.name().to_string(),
                path: overlay.source_dir.clone(),
            });
        }

        tracing::debug!(overlay = overlay.name(), "applying example overlay");
        copied_files.extend(copy_tree(&overlay.source_dir, target_dir, CopyMode::Overwrite)?);
    }

    Ok(copied_files)
}
