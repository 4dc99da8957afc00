//! Environment overrides for the generator

use crate::error::ConfigError;
use crate::product::ProductConfig;
use crate::remote::fetcher::DEFAULT_HTTP_TIMEOUT;
use crate::remote::installer::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS};
use std::path::PathBuf;
use std::time::Duration;

const TEMPLATE_DIR_VAR: &str = "TEMPLATE_DIR";
const ATTEMPTS_VAR: &str = "EXAMPLE_SOURCE_ATTEMPTS";
const RETRY_DELAY_VAR: &str = "EXAMPLE_SOURCE_RETRY_DELAY_MS";
const HTTP_TIMEOUT_VAR: &str = "HTTP_TIMEOUT_SECS";

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldSettings {
    /// Generator root from `<PREFIX>_TEMPLATE_DIR`, if set
    pub template_dir: Option<PathBuf>,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    pub http_timeout: Duration,
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            template_dir: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl ScaffoldSettings {
    /// Read overrides from the process environment
    pub fn from_env<C: ProductConfig>(config: &C) -> Result<Self, ConfigError> {
        Self::from_lookup(config.env_prefix(), |name| std::env::var(name).ok())
    }

    /// Resolve settings through `lookup`, which maps a variable name to its value
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |suffix: &str| {
            let var = format!("{}_{}", prefix, suffix);
            let value = lookup(&var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
            (var, value)
        };

        let mut settings = Self::default();

        if let (_, Some(dir)) = read(TEMPLATE_DIR_VAR) {
            settings.template_dir = Some(PathBuf::from(dir));
        }

        if let (var, Some(value)) = read(ATTEMPTS_VAR) {
            settings.max_attempts = match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(invalid(var, value, "a positive integer")),
            };
        }

        if let (var, Some(value)) = read(RETRY_DELAY_VAR) {
            settings.retry_delay_ms = value
                .parse::<u64>()
                .map_err(|_| invalid(var, value, "a non-negative integer"))?;
        }

        if let (var, Some(value)) = read(HTTP_TIMEOUT_VAR) {
            settings.http_timeout = match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(invalid(var, value, "a positive number of seconds")),
            };
        }

        Ok(settings)
    }

    /// Pick the generator root: CLI flag, then environment, then the product default
    pub fn resolve_template_dir<C: ProductConfig>(
        &self,
        config: &C,
        cli_override: Option<PathBuf>,
    ) -> PathBuf {
        cli_override
            .or_else(|| self.template_dir.clone())
            .unwrap_or_else(|| config.default_template_dir().to_path_buf())
    }
}

fn invalid(var: String, value: String, expected: &'static str) -> ConfigError {
    ConfigError {
        var,
        value,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::PackageManager;
    use std::collections::HashMap;
    use std::path::Path;

    #[derive(Clone)]
    struct TestProduct;

    impl ProductConfig for TestProduct {
        fn name(&self) -> &'static str {
            "capt-test"
        }
        fn display_name(&self) -> &'static str {
            "Test"
        }
        fn env_prefix(&self) -> &'static str {
            "CAPT_TEST"
        }
        fn default_template_dir(&self) -> &'static Path {
            Path::new("/bundled/templates")
        }
        fn next_steps(&self, _display_path: &str, _pm: PackageManager) -> Vec<String> {
            Vec::new()
        }
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = ScaffoldSettings::from_lookup("CAPT", lookup(&[])).unwrap();
        assert_eq!(settings, ScaffoldSettings::default());
        assert_eq!(settings.max_attempts, 3);
        assert_eq!(settings.retry_delay_ms, 400);
        assert_eq!(settings.http_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_overrides() {
        let settings = ScaffoldSettings::from_lookup(
            "CAPT",
            lookup(&[
                ("CAPT_TEMPLATE_DIR", "/opt/templates"),
                ("CAPT_EXAMPLE_SOURCE_ATTEMPTS", "5"),
                ("CAPT_EXAMPLE_SOURCE_RETRY_DELAY_MS", "0"),
                ("CAPT_HTTP_TIMEOUT_SECS", " 10 "),
            ]),
        )
        .unwrap();

        assert_eq!(settings.template_dir, Some(PathBuf::from("/opt/templates")));
        assert_eq!(settings.max_attempts, 5);
        assert_eq!(settings.retry_delay_ms, 0);
        assert_eq!(settings.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_malformed_values_name_the_variable() {
        let err = ScaffoldSettings::from_lookup(
            "CAPT",
            lookup(&[("CAPT_EXAMPLE_SOURCE_ATTEMPTS", "0")]),
        )
        .unwrap_err();
        assert_eq!(err.var, "CAPT_EXAMPLE_SOURCE_ATTEMPTS");
        assert!(err.to_string().contains("positive integer"));

        let err = ScaffoldSettings::from_lookup(
            "CAPT",
            lookup(&[("CAPT_EXAMPLE_SOURCE_RETRY_DELAY_MS", "-1")]),
        )
        .unwrap_err();
        assert_eq!(err.var, "CAPT_EXAMPLE_SOURCE_RETRY_DELAY_MS");
    }

    #[test]
    fn test_empty_values_are_unset() {
        let settings =
            ScaffoldSettings::from_lookup("CAPT", lookup(&[("CAPT_TEMPLATE_DIR", "  ")])).unwrap();
        assert_eq!(settings.template_dir, None);
    }

    #[test]
    fn test_template_dir_precedence() {
        let settings = ScaffoldSettings {
            template_dir: Some(PathBuf::from("/env")),
            ..ScaffoldSettings::default()
        };
        assert_eq!(
            settings.resolve_template_dir(&TestProduct, Some(PathBuf::from("/cli"))),
            PathBuf::from("/cli")
        );
        assert_eq!(
            settings.resolve_template_dir(&TestProduct, None),
            PathBuf::from("/env")
        );
        assert_eq!(
            ScaffoldSettings::default().resolve_template_dir(&TestProduct, None),
            PathBuf::from("/bundled/templates")
        );
    }
}
