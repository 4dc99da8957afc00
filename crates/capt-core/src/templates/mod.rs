//! Template planning, copying and finalization
//!
//! This module provides:
//! - Example selection and overlay ordering
//! - Install plans (base template plus overlays)
//! - Strict base copy and last-wins overlay merge
//! - Starter `package.json` generation
//! - Placeholder replacement and unresolved-placeholder detection

pub mod copier;
pub mod installer;
pub mod package_json;
pub mod placeholders;
pub mod plan;
pub mod selection;

pub use copier::{copy_tree, CopyMode};
pub use installer::install_plan;
pub use package_json::write_package_json;
pub use placeholders::{apply_placeholders, assert_no_unresolved_placeholders, placeholder_map};
pub use plan::{resolve_plan, BaseTemplate, OverlayTemplate, TemplateInstallPlan};
pub use selection::{ExampleOverlay, ExampleSelection};

/// Base template directory under the generator root
pub const SCAFFOLD_DIR: &str = "scaffold";

/// Overlay directory under the generator root, one subdirectory per overlay
pub const OVERLAY_EXAMPLES_DIR: &str = "overlays/examples";

/// Entries copied from the base template, in copy order
pub const TEMPLATE_COPY_ENTRIES: &[&str] = &[
    ".solhint.json",
    "gitignore",
    "Makefile",
    "README.md",
    "contracts",
    "scripts",
];

/// Generated files that carry placeholder tokens
pub const PLACEHOLDER_TEXT_FILES: &[&str] = &["README.md"];
