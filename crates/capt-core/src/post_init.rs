//! Checks and fix-ups run once a project has been generated

use crate::error::TemplateError;
use crate::templates::ExampleSelection;
use std::fs;
use std::path::{Path, PathBuf};

/// Deployment scripts shipped in every generated project
pub const DEPLOYMENT_SCRIPTS: &[&str] = &[
    "scripts/compile-aztec-contract.sh",
    "scripts/deploy.sh",
    "scripts/integration-test-deployment.sh",
    "scripts/verify-deployment.sh",
];

const REQUIRED_PATHS: &[&str] = &["README.md", "package.json", "contracts/l1", "contracts/aztec"];

/// What the hooks need to know about the generated project
#[derive(Debug, Clone)]
pub struct PostInitContext<'a> {
    pub absolute_target_path: &'a Path,
    pub example_selection: ExampleSelection,
}

type PostInitHook = fn(&PostInitContext<'_>) -> Result<(), TemplateError>;

const POST_INIT_HOOKS: &[(&str, PostInitHook)] = &[
    ("verify-layout", verify_required_layout),
    ("script-permissions", ensure_scripts_executable),
];

/// Run every hook in order, stopping at the first failure
pub fn run_post_init_hooks(context: &PostInitContext<'_>) -> Result<(), TemplateError> {
    for (name, hook) in POST_INIT_HOOKS {
        tracing::debug!(hook = name, "running post-init hook");
        hook(context)?;
    }
    Ok(())
}

/// Paths every generated project must contain, relative to its root
pub fn required_paths(selection: ExampleSelection) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = REQUIRED_PATHS
        .iter()
        .chain(DEPLOYMENT_SCRIPTS)
        .map(PathBuf::from)
        .collect();
    paths.extend(
        selection
            .overlays()
            .into_iter()
            .map(|overlay| Path::new("examples").join(overlay.name())),
    );
    paths
}

fn verify_required_layout(context: &PostInitContext<'_>) -> Result<(), TemplateError> {
    for relative in required_paths(context.example_selection) {
        if fs::symlink_metadata(context.absolute_target_path.join(&relative)).is_err() {
            return Err(TemplateError::MissingRequiredPath(relative));
        }
    }
    Ok(())
}

#[cfg(unix)]
fn ensure_scripts_executable(context: &PostInitContext<'_>) -> Result<(), TemplateError> {
    use std::os::unix::fs::PermissionsExt;

    for script in DEPLOYMENT_SCRIPTS {
        let path = context.absolute_target_path.join(script);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).map_err(|e| {
            TemplateError::io(format!("Failed to mark {} executable", path.display()), e)
        })?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_scripts_executable(_context: &PostInitContext<'_>) -> Result<(), TemplateError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::ExampleOverlay;

    fn generated_project(root: &Path) {
        for dir in ["contracts/l1", "contracts/aztec", "scripts"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        fs::write(root.join("README.md"), "# demo\n").unwrap();
        fs::write(root.join("package.json"), "{}\n").unwrap();
        for script in DEPLOYMENT_SCRIPTS {
            fs::write(root.join(script), "#!/usr/bin/env bash\n").unwrap();
        }
    }

    #[test]
    fn test_required_paths_include_overlays() {
        let paths = required_paths(ExampleSelection::All);
        assert_eq!(paths.len(), 11);
        assert!(paths.contains(&PathBuf::from("examples/lido")));

        let paths = required_paths(ExampleSelection::Single(ExampleOverlay::Aave));
        assert_eq!(paths.last(), Some(&PathBuf::from("examples/aave")));
    }

    #[test]
    fn test_hooks_pass_on_complete_layout() {
        let temp = tempfile::tempdir().unwrap();
        generated_project(temp.path());

        let context = PostInitContext {
            absolute_target_path: temp.path(),
            example_selection: ExampleSelection::None,
        };
        run_post_init_hooks(&context).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(temp.path().join("scripts/deploy.sh"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_missing_overlay_dir_fails() {
        let temp = tempfile::tempdir().unwrap();
        generated_project(temp.path());

        let context = PostInitContext {
            absolute_target_path: temp.path(),
            example_selection: ExampleSelection::Single(ExampleOverlay::Uniswap),
        };
        let err = run_post_init_hooks(&context).unwrap_err();
        assert!(
            matches!(err, TemplateError::MissingRequiredPath(ref p) if p == Path::new("examples/uniswap"))
        );
    }

    #[test]
    fn test_missing_script_fails() {
        let temp = tempfile::tempdir().unwrap();
        generated_project(temp.path());
        fs::remove_file(temp.path().join("scripts/verify-deployment.sh")).unwrap();

        let context = PostInitContext {
            absolute_target_path: temp.path(),
            example_selection: ExampleSelection::None,
        };
        assert!(matches!(
            run_post_init_hooks(&context),
            Err(TemplateError::MissingRequiredPath(_))
        ));
    }
}
