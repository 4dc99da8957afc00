//! Product configuration trait for the generator binary
//!
//! The binary implements this trait to name itself, pick its environment
//! variable prefix and phrase the instructions shown after generation.

use crate::project::PackageManager;
use std::path::Path;

/// Configuration trait for a scaffolding product
///
/// Implementors define:
/// - Product identity (name, display name)
/// - Environment variable prefix for overrides
/// - Where the bundled templates live
/// - Post-generation instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (binary name, temp dir prefix)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Prefix for environment overrides, e.g. `CAPT` for `CAPT_TEMPLATE_DIR`
    fn env_prefix(&self) -> &'static str;

    /// Generator root used when neither the CLI nor the environment names one
    fn default_template_dir(&self) -> &'static Path;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, display_path: &str, package_manager: PackageManager) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }

    /// Prefix of the scratch directory used while installing a remote example
    fn temp_dir_prefix(&self) -> String {
        format!("{}-example-source-", self.name())
    }
}
