//! Starter `package.json` for generated projects

use crate::error::TemplateError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DESCRIPTION: &str = "Protocol-agnostic starter for Aztec privacy integrations";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StarterPackageJson<'a> {
    name: &'a str,
    private: bool,
    version: &'static str,
    description: &'static str,
    license: &'static str,
    scripts: BTreeMap<&'static str, &'static str>,
    dev_dependencies: BTreeMap<&'static str, &'static str>,
}

impl<'a> StarterPackageJson<'a> {
    fn new(project_name: &'a str) -> Self {
        Self {
            name: project_name,
            private: true,
            version: "0.1.0",
            description: DESCRIPTION,
            license: "MIT",
            scripts: BTreeMap::from([
                ("fmt", "make fmt"),
                ("fmt:check", "make fmt-check"),
                ("lint", "make lint"),
                ("test", "make test"),
            ]),
            dev_dependencies: BTreeMap::from([("solhint", "^6.0.3")]),
        }
    }
}

/// Render the starter manifest, pretty-printed with a trailing newline
pub fn render_package_json(project_name: &str) -> Result<String, serde_json::Error> {
    let mut rendered = serde_json::to_string_pretty(&StarterPackageJson::new(project_name))?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write `package.json` into `target_dir`
pub fn write_package_json(target_dir: &Path, project_name: &str) -> Result<(), TemplateError> {
    let path = target_dir.join("package.json");
    let rendered = render_package_json(project_name).map_err(|e| {
        TemplateError::io(
            "Failed to render package.json",
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })?;

    fs::write(&path, rendered)
        .map_err(|e| TemplateError::io(format!("Failed to write {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fields() {
        let rendered = render_package_json("demo-app").unwrap();
        assert!(rendered.ends_with("}\n"));

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["name"], "demo-app");
        assert_eq!(value["private"], true);
        assert_eq!(value["version"], "0.1.0");
        assert_eq!(value["license"], "MIT");
        assert_eq!(value["scripts"]["fmt:check"], "make fmt-check");
        assert_eq!(value["devDependencies"]["solhint"], "^6.0.3");
    }

    #[test]
    fn test_write_package_json() {
        let temp = tempfile::tempdir().unwrap();
        write_package_json(temp.path(), "demo").unwrap();

        let content = fs::read_to_string(temp.path().join("package.json")).unwrap();
        assert!(content.contains("\"name\": \"demo\""));
        assert!(content.contains("\"description\": \"Protocol-agnostic starter"));
    }
}
