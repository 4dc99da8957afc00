//! Charm-style progress output using cliclack

use crate::app::{create_app, CreateAppOptions, CreateAppResult};
use crate::config::ScaffoldSettings;
use crate::product::ProductConfig;
use crate::project::PackageManager;
use crate::remote::{ExampleSourceInstaller, InstallOutcome};
use crate::templates::ExampleSelection;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Everything the create command needs, already validated by the CLI
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name or path
    pub project: String,

    pub package_manager: PackageManager,

    pub example_selection: ExampleSelection,

    /// GitHub example merged over the generated project
    pub example_source: Option<String>,

    /// Generator root overriding the environment and the bundled templates
    pub template_dir: Option<PathBuf>,
}

/// Generate a project and report progress
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let settings = ScaffoldSettings::from_env(config)?;
    let generator_root = settings.resolve_template_dir(config, args.template_dir.clone());
    cliclack::log::info(format!("Using templates from {}", generator_root.display()))?;

    check_package_manager(args.package_manager)?;

    let installer = ExampleSourceInstaller::from_config(config, &settings)?;
    let options = CreateAppOptions {
        generator_root,
        project_arg: args.project.clone(),
        package_manager: args.package_manager,
        example_selection: args.example_selection,
        example_source: args.example_source.clone(),
    };

    let cwd = std::env::current_dir()?;

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let result = match create_app(&options, &cwd, &installer).await {
        Ok(result) => result,
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e);
        }
    };

    spinner.stop(format!(
        "Scaffolded Aztec privacy starter at {}",
        result.display_path
    ));

    if let Some(outcome) = &result.remote_example {
        report_remote_example(outcome)?;
    }

    print_next_steps(config, &result)?;

    Ok(())
}

/// Advisory only: nothing is installed, the user runs the install step
fn check_package_manager(package_manager: PackageManager) -> Result<()> {
    match package_manager.detect_version() {
        Some(version) => {
            cliclack::log::success(format!("{} installed ({})", package_manager, version))?;
        }
        None => {
            cliclack::log::warning(format!(
                "{} is not installed. Install it before running `{}`.",
                package_manager,
                package_manager.install_command()
            ))?;
        }
    }
    Ok(())
}

fn report_remote_example(outcome: &InstallOutcome) -> Result<()> {
    match outcome.fallback_reason() {
        None => cliclack::log::success(format!(
            "Applied remote example source: {}",
            outcome.source()
        ))?,
        Some(reason) => cliclack::log::warning(format!(
            "Remote example source unavailable ({}). Falling back to local built-in examples.",
            reason
        ))?,
    }
    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, result: &CreateAppResult) -> Result<()> {
    let steps = config.next_steps(&result.display_path, result.package_manager);

    println!();
    println!("  {}", "Next steps".bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step.cyan());
    }

    println!();
    cliclack::outro("Happy building!")?;

    Ok(())
}
