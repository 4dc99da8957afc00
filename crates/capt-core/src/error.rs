//! Error types shared by the scaffolding layers

use std::path::PathBuf;
use thiserror::Error;

/// A malformed example-source string
///
/// The message is user-facing and reported verbatim by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SourceError(String);

impl SourceError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// An unsupported value for one of the generator's enumerated options
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Unsupported example \"{0}\". Supported values: none, aave, lido, uniswap, all")]
    UnsupportedExample(String),

    #[error("Unsupported package manager \"{0}\". Supported values: bun, npm, pnpm, yarn")]
    UnsupportedPackageManager(String),
}

/// Errors that abort a remote example install before any attempt is made
#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("maxAttempts must be a positive integer.")]
    InvalidMaxAttempts,
}

/// Errors raised while laying down template files
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("Template source not found: {}", .0.display())]
    MissingTemplateSource(PathBuf),

    #[error("Example overlay '{name}' not found at {}", .path.display())]
    MissingOverlay { name: String, path: PathBuf },

    #[error("Found unresolved placeholders in generated output: {}", format_paths(.0))]
    UnresolvedPlaceholders(Vec<PathBuf>),

    #[error("Generated project is missing required path: {}", .0.display())]
    MissingRequiredPath(PathBuf),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Errors raised while validating the project target
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project name/path is required. Example: create-aztec-privacy-template my-app")]
    MissingProjectArg,

    #[error(
        "Invalid project name \"{0}\". Use lowercase letters, numbers, hyphens, or underscores."
    )]
    InvalidProjectName(String),

    #[error("Target path exists and is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Target directory must be empty: {}", .0.display())]
    NotEmpty(PathBuf),

    #[error("Failed to inspect target path {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A malformed environment override
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value \"{value}\" for {var}: expected {expected}")]
pub struct ConfigError {
    pub var: String,
    pub value: String,
    pub expected: &'static str,
}
