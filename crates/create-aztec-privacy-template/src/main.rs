//! create-aztec-privacy-template - Scaffold Aztec privacy integration starters

mod logging;
mod product;

use anyhow::Result;
use capt_core::tui::CreateArgs;
use capt_core::{ExampleSelection, GithubSource, PackageManager, SourceError};
use clap::Parser;
use product::AztecPrivacyTemplate;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Parser, Debug)]
#[command(name = "create-aztec-privacy-template")]
#[command(about = "Scaffold a protocol-agnostic Aztec privacy integration starter")]
#[command(version)]
pub struct Args {
    /// Project name or path to create
    #[arg(default_value = "my-aztec-app")]
    pub project: String,

    /// Package manager shown in the generated instructions (bun, npm, pnpm, yarn)
    #[arg(long = "pm", default_value = "npm")]
    pub package_manager: PackageManager,

    /// Bundled protocol examples to include (none, aave, lido, uniswap, all)
    #[arg(long, default_value = "none")]
    pub example: ExampleSelection,

    /// GitHub example to merge over the project (URL or owner/repo[/path][#ref])
    #[arg(long = "example-source", value_parser = parse_example_source)]
    pub example_source: Option<String>,

    /// Local generator root to use instead of the bundled templates (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            project: args.project,
            package_manager: args.package_manager,
            example_selection: args.example,
            example_source: args.example_source,
            template_dir: args.template_dir,
        }
    }
}

/// Reject malformed sources at parse time, keep the raw text
fn parse_example_source(value: &str) -> Result<String, SourceError> {
    GithubSource::parse(value)?;
    Ok(value.trim().to_string())
}

/// Drive `work` to completion unless `interrupt` fires first
///
/// On interrupt `work` is dropped before this returns, so temporary
/// directories it owns are cleaned up.
async fn run_until_interrupted<F: Future>(work: F, interrupt: &Notify) -> Option<F::Output> {
    tokio::select! {
        output = work => Some(output),
        _ = interrupt.notified() => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully: stop the run, then exit
    let interrupt = Arc::new(Notify::new());
    let handler_interrupt = Arc::clone(&interrupt);
    ctrlc::set_handler(move || handler_interrupt.notify_one()).ok();

    let args = Args::parse();
    logging::init_logging(args.verbose)?;
    tracing::debug!(?args, "parsed arguments");

    let outcome =
        run_until_interrupted(capt_core::run(&AztecPrivacyTemplate, args.into()), &interrupt).await;

    // Ensure cursor is visible on exit
    let _ = console::Term::stderr().show_cursor();

    match outcome {
        Some(result) => result,
        None => std::process::exit(130),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["create-aztec-privacy-template"]).unwrap();
        assert_eq!(args.project, "my-aztec-app");
        assert_eq!(args.package_manager, PackageManager::Npm);
        assert_eq!(args.example, ExampleSelection::None);
        assert_eq!(args.example_source, None);
    }

    #[test]
    fn test_example_source_is_validated() {
        let args = Args::try_parse_from([
            "create-aztec-privacy-template",
            "demo",
            "--example-source",
            " acme/capt-starter#main ",
        ])
        .unwrap();
        assert_eq!(args.example_source.as_deref(), Some("acme/capt-starter#main"));

        assert!(Args::try_parse_from([
            "create-aztec-privacy-template",
            "--example-source",
            "https://gitlab.com/acme/repo",
        ])
        .is_err());
    }

    #[tokio::test]
    async fn test_interrupt_drops_in_flight_work() {
        let interrupt = Notify::new();
        let scratch = tempfile::tempdir().unwrap();
        let scratch_path = scratch.path().to_path_buf();
        let work = async move {
            let _scratch = scratch;
            std::future::pending::<()>().await
        };

        interrupt.notify_one();
        assert!(run_until_interrupted(work, &interrupt).await.is_none());
        assert!(!scratch_path.exists());
    }

    #[tokio::test]
    async fn test_finished_work_is_returned() {
        let interrupt = Notify::new();
        assert_eq!(run_until_interrupted(async { 7 }, &interrupt).await, Some(7));
    }
}
