//! Project target resolution and validation

pub mod package_manager;

pub use package_manager::PackageManager;

use crate::error::ProjectError;
use crate::paths::normalize_lexically;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a project is scaffolded and what it is called
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    pub absolute_target_path: PathBuf,
    pub project_name: String,
}

/// Resolve a project name or path against `cwd`
///
/// The final path component becomes the project name and must be lowercase
/// letters, digits, `-` or `_`, starting with a letter or digit.
pub fn resolve_project_target(project_arg: &str, cwd: &Path) -> Result<ProjectTarget, ProjectError> {
    let trimmed = project_arg.trim();
    if trimmed.is_empty() {
        return Err(ProjectError::MissingProjectArg);
    }

    let absolute_target_path = normalize_lexically(&cwd.join(trimmed));
    let project_name = absolute_target_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !is_valid_project_name(&project_name) {
        return Err(ProjectError::InvalidProjectName(project_name));
    }

    Ok(ProjectTarget {
        absolute_target_path,
        project_name,
    })
}

/// The target must not exist yet, or be an empty directory
pub fn assert_target_path_safe(path: &Path) -> Result<(), ProjectError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(ProjectError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if !metadata.is_dir() {
        return Err(ProjectError::NotADirectory(path.to_path_buf()));
    }

    let mut entries = fs::read_dir(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if entries.next().is_some() {
        return Err(ProjectError::NotEmpty(path.to_path_buf()));
    }

    Ok(())
}

fn is_valid_project_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_lowercase() || first.is_ascii_digit())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_relative_to_cwd() {
        let target = resolve_project_target(" apps/../my-app ", Path::new("/work")).unwrap();
        assert_eq!(target.absolute_target_path, PathBuf::from("/work/my-app"));
        assert_eq!(target.project_name, "my-app");
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let target = resolve_project_target("/srv/app_2", Path::new("/work")).unwrap();
        assert_eq!(target.absolute_target_path, PathBuf::from("/srv/app_2"));
    }

    #[test]
    fn test_rejects_bad_names() {
        assert!(matches!(
            resolve_project_target("  ", Path::new("/work")),
            Err(ProjectError::MissingProjectArg)
        ));
        for bad in ["My-App", "-app", "app.js", "_x"] {
            assert!(
                matches!(
                    resolve_project_target(bad, Path::new("/work")),
                    Err(ProjectError::InvalidProjectName(_))
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_target_must_be_empty_dir() {
        let temp = tempfile::tempdir().unwrap();
        assert!(assert_target_path_safe(&temp.path().join("missing")).is_ok());
        assert!(assert_target_path_safe(temp.path()).is_ok());

        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            assert_target_path_safe(&file),
            Err(ProjectError::NotADirectory(_))
        ));
        assert!(matches!(
            assert_target_path_safe(temp.path()),
            Err(ProjectError::NotEmpty(_))
        ));
    }
}
