//! Package manager selection and availability probing

use crate::error::ValueError;
use std::fmt;
use std::process::Command;
use std::str::FromStr;

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackageManager {
    Bun,
    #[default]
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [Self::Bun, Self::Npm, Self::Pnpm, Self::Yarn];

    /// Binary name, also the value accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Bun => "bun",
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.name())
    }

    /// Installed version, or `None` when the binary is not on PATH
    pub fn detect_version(&self) -> Option<String> {
        let output = Command::new(self.name()).arg("--version").output().ok()?;
        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageManager {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.name() == s)
            .ok_or_else(|| ValueError::UnsupportedPackageManager(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_commands() {
        assert_eq!(PackageManager::Bun.install_command(), "bun install");
        assert_eq!(PackageManager::Pnpm.install_command(), "pnpm install");
        assert_eq!(PackageManager::default(), PackageManager::Npm);
    }

    #[test]
    fn test_parse() {
        assert_eq!("yarn".parse::<PackageManager>().unwrap(), PackageManager::Yarn);
        let err = "pip".parse::<PackageManager>().unwrap_err();
        assert!(err.to_string().contains("Unsupported package manager \"pip\""));
    }
}
