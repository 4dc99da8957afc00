//! CAPT Core - Library behind `create-aztec-privacy-template`
//!
//! This library scaffolds Aztec privacy starter projects: a bundled base
//! template, optional protocol example overlays, and an optional example
//! pulled from GitHub on top.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Source parsing, archive fetch/extract, template planning and copying
//! - **Layer 2: Workflow Orchestration** - `ProductConfig`, `ScaffoldSettings` and [`create_app`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based progress output (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based output module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use capt_core::{create_app, CreateAppOptions, ExampleSourceInstaller, ScaffoldSettings};
//!
//! let settings = ScaffoldSettings::from_env(&MyProduct)?;
//! let installer = ExampleSourceInstaller::from_config(&MyProduct, &settings)?;
//! let result = create_app(&options, &std::env::current_dir()?, &installer).await?;
//! println!("created {}", result.display_path);
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod paths;
pub mod post_init;
pub mod product;
pub mod project;
pub mod remote;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use app::{create_app, CreateAppOptions, CreateAppResult};
pub use config::ScaffoldSettings;
pub use error::{ConfigError, InstallError, ProjectError, SourceError, TemplateError, ValueError};
pub use product::ProductConfig;
pub use project::{PackageManager, ProjectTarget};
pub use remote::{
    ExampleSourceInstaller, GithubSource, InstallOptions, InstallOutcome,
};
pub use templates::{ExampleOverlay, ExampleSelection, TemplateInstallPlan};

#[cfg(feature = "tui")]
pub use tui::run;
