//! Template install planning
//!
//! A plan is one base template plus the selected overlays. It is resolved
//! without touching the filesystem; [`super::installer`] executes it.

use super::selection::{ExampleOverlay, ExampleSelection};
use super::{OVERLAY_EXAMPLES_DIR, SCAFFOLD_DIR, TEMPLATE_COPY_ENTRIES};
use std::path::{Path, PathBuf};

/// The base template: a fixed list of entries copied from the scaffold directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTemplate {
    pub source_dir: PathBuf,
    pub copy_entries: &'static [&'static str],
}

/// One example overlay merged over the base template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayTemplate {
    pub overlay: ExampleOverlay,
    pub source_dir: PathBuf,
}

impl OverlayTemplate {
    pub fn name(&self) -> &'static str {
        self.overlay.name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInstallPlan {
    pub base: BaseTemplate,
    /// Applied in order; later entries win on file collisions
    pub overlays: Vec<OverlayTemplate>,
}

impl TemplateInstallPlan {
    pub fn overlay_names(&self) -> Vec<&'static str> {
        self.overlays.iter().map(OverlayTemplate::name).collect()
    }
}

/// Resolve the install plan for a generator root and example selection
pub fn resolve_plan(generator_root: &Path, selection: ExampleSelection) -> TemplateInstallPlan {
    TemplateInstallPlan {
        base: BaseTemplate {
            source_dir: generator_root.join(SCAFFOLD_DIR),
            copy_entries: TEMPLATE_COPY_ENTRIES,
        },
        overlays: selection
            .overlays()
            .into_iter()
            .map(|overlay| OverlayTemplate {
                overlay,
                source_dir: generator_root.join(OVERLAY_EXAMPLES_DIR).join(overlay.name()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_has_no_overlays() {
        let plan = resolve_plan(Path::new("/gen"), ExampleSelection::None);
        assert_eq!(plan.base.source_dir, PathBuf::from("/gen/scaffold"));
        assert_eq!(plan.base.copy_entries, TEMPLATE_COPY_ENTRIES);
        assert!(plan.overlays.is_empty());
    }

    #[test]
    fn test_single_overlay() {
        let plan = resolve_plan(
            Path::new("/gen"),
            ExampleSelection::Single(ExampleOverlay::Uniswap),
        );
        assert_eq!(plan.overlay_names(), vec!["uniswap"]);
        assert_eq!(
            plan.overlays[0].source_dir,
            PathBuf::from("/gen/overlays/examples/uniswap")
        );
    }

    #[test]
    fn test_all_is_deterministic() {
        let first = resolve_plan(Path::new("/gen"), ExampleSelection::All);
        let second = resolve_plan(Path::new("/gen"), ExampleSelection::All);
        assert_eq!(first.overlay_names(), vec!["aave", "lido", "uniswap"]);
        assert_eq!(first, second);
    }
}
