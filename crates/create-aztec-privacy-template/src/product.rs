//! Product configuration for create-aztec-privacy-template

use capt_core::{PackageManager, ProductConfig};
use std::path::Path;

/// Templates bundled with the workspace
const BUNDLED_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

#[derive(Clone)]
pub struct AztecPrivacyTemplate;

impl ProductConfig for AztecPrivacyTemplate {
    fn name(&self) -> &'static str {
        "create-aztec-privacy-template"
    }

    fn display_name(&self) -> &'static str {
        "Aztec Privacy Template"
    }

    fn env_prefix(&self) -> &'static str {
        "CAPT"
    }

    fn default_template_dir(&self) -> &'static Path {
        Path::new(BUNDLED_TEMPLATE_DIR)
    }

    fn next_steps(&self, display_path: &str, package_manager: PackageManager) -> Vec<String> {
        vec![
            format!("cd {}", display_path),
            package_manager.install_command(),
            "make check".to_string(),
        ]
    }

    fn user_agent(&self) -> &'static str {
        concat!("create-aztec-privacy-template/", env!("CARGO_PKG_VERSION"))
    }
}
