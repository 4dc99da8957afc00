//! End-to-end project generation
//!
//! Ties target validation, template installation, the optional remote
//! example and the post-init hooks together. No prompts; callers pass
//! everything up front.

use crate::post_init::{run_post_init_hooks, PostInitContext};
use crate::project::{assert_target_path_safe, resolve_project_target, PackageManager};
use crate::remote::{ExampleSourceInstaller, InstallOptions, InstallOutcome};
use crate::templates::{
    apply_placeholders, assert_no_unresolved_placeholders, install_plan, placeholder_map,
    resolve_plan, write_package_json, ExampleSelection,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CreateAppOptions {
    /// Directory holding `scaffold/` and `overlays/examples/`
    pub generator_root: PathBuf,
    /// Project name or path, resolved against the working directory
    pub project_arg: String,
    pub package_manager: PackageManager,
    pub example_selection: ExampleSelection,
    /// GitHub source merged over the generated project, if any
    pub example_source: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateAppResult {
    pub absolute_target_path: PathBuf,
    /// Target relative to the working directory when it lies below it
    pub display_path: String,
    pub project_name: String,
    pub package_manager: PackageManager,
    /// Present when an example source was requested
    pub remote_example: Option<InstallOutcome>,
}

/// Generate a project
///
/// A remote example that cannot be fetched is not an error; see
/// [`CreateAppResult::remote_example`].
pub async fn create_app(
    options: &CreateAppOptions,
    cwd: &Path,
    installer: &ExampleSourceInstaller,
) -> Result<CreateAppResult> {
    let target = resolve_project_target(&options.project_arg, cwd)?;
    assert_target_path_safe(&target.absolute_target_path)?;
    let target_dir = target.absolute_target_path.as_path();

    let plan = resolve_plan(&options.generator_root, options.example_selection);
    tracing::info!(
        target = %target_dir.display(),
        overlays = ?plan.overlay_names(),
        "installing template"
    );
    install_plan(target_dir, &plan).context("Failed to install project template")?;
    write_package_json(target_dir, &target.project_name)?;

    let remote_example = match &options.example_source {
        Some(source) => {
            let outcome = installer
                .install(&InstallOptions::new(target_dir, source.as_str()))
                .await?;
            if let Some(reason) = outcome.fallback_reason() {
                tracing::warn!(source = outcome.source(), reason, "falling back to bundled examples");
            }
            Some(outcome)
        }
        None => None,
    };

    let replacements = placeholder_map(&target.project_name, options.package_manager);
    apply_placeholders(target_dir, &replacements)?;
    assert_no_unresolved_placeholders(target_dir)?;

    run_post_init_hooks(&PostInitContext {
        absolute_target_path: target_dir,
        example_selection: options.example_selection,
    })?;

    Ok(CreateAppResult {
        display_path: display_path(cwd, target_dir),
        absolute_target_path: target.absolute_target_path.clone(),
        project_name: target.project_name,
        package_manager: options.package_manager,
        remote_example,
    })
}

/// Path shown to the user: relative to `cwd` when below it, absolute otherwise
pub fn display_path(cwd: &Path, target: &Path) -> String {
    match target.strip_prefix(cwd) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => target.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{ArchiveExtractor, ArchiveFetcher, Sleeper};
    use crate::templates::ExampleOverlay;
    use async_trait::async_trait;
    use std::fs;
    use std::time::Duration;
    use url::Url;

    struct OfflineFetcher;

    #[async_trait]
    impl ArchiveFetcher for OfflineFetcher {
        async fn fetch(&self, _url: &Url) -> Result<Vec<u8>> {
            anyhow::bail!("network unreachable")
        }
    }

    /// Extracts a single custom example under `repo-main/`
    struct ExampleExtractor;

    #[async_trait]
    impl ArchiveExtractor for ExampleExtractor {
        async fn extract(&self, _archive_path: &Path, extract_dir: &Path) -> Result<()> {
            let dir = extract_dir.join("repo-main/examples/custom");
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("README.md"), "# Custom Example\n")?;
            Ok(())
        }
    }

    struct NoSleep;

    #[async_trait]
    impl Sleeper for NoSleep {
        async fn sleep(&self, _duration: Duration) {}
    }

    struct AcceptingFetcher;

    #[async_trait]
    impl ArchiveFetcher for AcceptingFetcher {
        async fn fetch(&self, _url: &Url) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn generator_root(root: &Path) {
        let scaffold = root.join("scaffold");
        write(&scaffold.join(".solhint.json"), "{}\n");
        write(&scaffold.join("gitignore"), "node_modules/\n");
        write(&scaffold.join("Makefile"), "check:\n\t@true\n");
        write(
            &scaffold.join("README.md"),
            "# __PROJECT_NAME__\n\n`__INSTALL_COMMAND__`\n",
        );
        write(&scaffold.join("contracts/l1/Portal.sol"), "// l1\n");
        write(&scaffold.join("contracts/aztec/Nargo.toml"), "[package]\n");
        for script in crate::post_init::DEPLOYMENT_SCRIPTS {
            write(&scaffold.join(script), "#!/usr/bin/env bash\n");
        }
        for overlay in ExampleOverlay::ORDER {
            write(
                &root
                    .join("overlays/examples")
                    .join(overlay.name())
                    .join("examples")
                    .join(overlay.name())
                    .join("README.md"),
                "# Example\n",
            );
        }
    }

    fn options(root: &Path, example_source: Option<&str>) -> CreateAppOptions {
        CreateAppOptions {
            generator_root: root.join("generator"),
            project_arg: "demo-app".to_string(),
            package_manager: PackageManager::Yarn,
            example_selection: ExampleSelection::All,
            example_source: example_source.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_generates_project_without_remote_example() {
        let temp = tempfile::tempdir().unwrap();
        generator_root(&temp.path().join("generator"));
        let installer =
            ExampleSourceInstaller::new(Box::new(OfflineFetcher), Box::new(ExampleExtractor), Box::new(NoSleep));

        let result = create_app(&options(temp.path(), None), temp.path(), &installer)
            .await
            .unwrap();

        assert_eq!(result.display_path, "demo-app");
        assert_eq!(result.project_name, "demo-app");
        assert!(result.remote_example.is_none());

        let readme = fs::read_to_string(result.absolute_target_path.join("README.md")).unwrap();
        assert_eq!(readme, "# demo-app\n\n`yarn install`\n");
        assert!(result.absolute_target_path.join("package.json").is_file());
        assert!(result.absolute_target_path.join("examples/uniswap/README.md").is_file());
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back() {
        let temp = tempfile::tempdir().unwrap();
        generator_root(&temp.path().join("generator"));
        let installer =
            ExampleSourceInstaller::new(Box::new(OfflineFetcher), Box::new(ExampleExtractor), Box::new(NoSleep));

        let result = create_app(
            &options(temp.path(), Some("acme/capt-starter/examples/custom")),
            temp.path(),
            &installer,
        )
        .await
        .unwrap();

        let outcome = result.remote_example.unwrap();
        assert!(!outcome.applied());
        assert_eq!(outcome.attempts(), 3);
        assert!(outcome.fallback_reason().unwrap().contains("network unreachable"));
        assert!(result.absolute_target_path.join("README.md").is_file());
    }

    #[tokio::test]
    async fn test_remote_example_overrides_readme() {
        let temp = tempfile::tempdir().unwrap();
        generator_root(&temp.path().join("generator"));
        let installer = ExampleSourceInstaller::new(
            Box::new(AcceptingFetcher),
            Box::new(ExampleExtractor),
            Box::new(NoSleep),
        );

        let result = create_app(
            &options(temp.path(), Some("acme/capt-starter/examples/custom#main")),
            temp.path(),
            &installer,
        )
        .await
        .unwrap();

        assert!(result.remote_example.unwrap().applied());
        assert_eq!(
            fs::read_to_string(result.absolute_target_path.join("README.md")).unwrap(),
            "# Custom Example\n"
        );
    }

    #[tokio::test]
    async fn test_non_empty_target_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        generator_root(&temp.path().join("generator"));
        write(&temp.path().join("demo-app/keep.txt"), "mine\n");
        let installer =
            ExampleSourceInstaller::new(Box::new(OfflineFetcher), Box::new(ExampleExtractor), Box::new(NoSleep));

        let err = create_app(&options(temp.path(), None), temp.path(), &installer)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Target directory must be empty"));
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(Path::new("/work"), Path::new("/work/app")), "app");
        assert_eq!(display_path(Path::new("/work"), Path::new("/srv/app")), "/srv/app");
        assert_eq!(display_path(Path::new("/work"), Path::new("/work")), "/work");
    }
}
