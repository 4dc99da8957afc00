//! `__TOKEN__` placeholder replacement

use super::PLACEHOLDER_TEXT_FILES;
use crate::error::TemplateError;
use crate::project::PackageManager;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

pub const PROJECT_NAME_TOKEN: &str = "__PROJECT_NAME__";
pub const INSTALL_COMMAND_TOKEN: &str = "__INSTALL_COMMAND__";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__[A-Z0-9_]+__").expect("invalid regex"));

/// Token replacements for a generated project
pub fn placeholder_map(
    project_name: &str,
    package_manager: PackageManager,
) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        (PROJECT_NAME_TOKEN, project_name.to_string()),
        (INSTALL_COMMAND_TOKEN, package_manager.install_command()),
    ])
}

/// Replace tokens in the placeholder-bearing files under `target_dir`
///
/// Files that were not generated are skipped.
pub fn apply_placeholders(
    target_dir: &Path,
    replacements: &BTreeMap<&'static str, String>,
) -> Result<(), TemplateError> {
    for relative in PLACEHOLDER_TEXT_FILES {
        let path = target_dir.join(relative);
        if !path.is_file() {
            continue;
        }

        let original = fs::read_to_string(&path)
            .map_err(|e| TemplateError::io(format!("Failed to read {}", path.display()), e))?;

        let updated = replacements
            .iter()
            .fold(original.clone(), |text, (token, value)| text.replace(token, value));

        if updated != original {
            fs::write(&path, updated)
                .map_err(|e| TemplateError::io(format!("Failed to write {}", path.display()), e))?;
            tracing::debug!(file = %relative, "replaced placeholders");
        }
    }

    Ok(())
}

/// Fail if any UTF-8 file under `target_dir` still contains a `__TOKEN__`
///
/// Offending paths are reported relative to `target_dir`, sorted.
pub fn assert_no_unresolved_placeholders(target_dir: &Path) -> Result<(), TemplateError> {
    let mut offenders: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(target_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            TemplateError::io(
                format!("Failed to scan {}", target_dir.display()),
                e.into(),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let bytes = fs::read(entry.path()).map_err(|e| {
            TemplateError::io(format!("Failed to read {}", entry.path().display()), e)
        })?;
        let Ok(text) = std::str::from_utf8(&bytes) else {
            continue;
        };

        if PLACEHOLDER.is_match(text) {
            let relative = entry
                .path()
                .strip_prefix(target_dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            offenders.push(relative);
        }
    }

    if offenders.is_empty() {
        Ok(())
    } else {
        offenders.sort();
        Err(TemplateError::UnresolvedPlaceholders(offenders))
    }
}
