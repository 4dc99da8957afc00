//! Example overlay selection

use crate::error::ValueError;
use std::fmt;
use std::str::FromStr;

/// A bundled protocol example that can be layered over the base template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExampleOverlay {
    Aave,
    Lido,
    Uniswap,
}

impl ExampleOverlay {
    /// Canonical layering order; later overlays win on file collisions
    pub const ORDER: [ExampleOverlay; 3] = [Self::Aave, Self::Lido, Self::Uniswap];

    pub fn name(&self) -> &'static str {
        match self {
            ExampleOverlay::Aave => "aave",
            ExampleOverlay::Lido => "lido",
            ExampleOverlay::Uniswap => "uniswap",
        }
    }
}

impl fmt::Display for ExampleOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which overlays a scaffold run applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExampleSelection {
    #[default]
    None,
    Single(ExampleOverlay),
    All,
}

impl ExampleSelection {
    /// Values accepted on the command line, in help order
    pub const SUPPORTED: [&'static str; 5] = ["none", "aave", "lido", "uniswap", "all"];

    /// Overlays to apply, always in [`ExampleOverlay::ORDER`]
    pub fn overlays(&self) -> Vec<ExampleOverlay> {
        match self {
            ExampleSelection::None => Vec::new(),
            ExampleSelection::Single(overlay) => vec![*overlay],
            ExampleSelection::All => ExampleOverlay::ORDER.to_vec(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExampleSelection::None => "none",
            ExampleSelection::Single(overlay) => overlay.name(),
            ExampleSelection::All => "all",
        }
    }
}

impl fmt::Display for ExampleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExampleSelection {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "all" => Ok(Self::All),
            other => ExampleOverlay::ORDER
                .into_iter()
                .find(|overlay| overlay.name() == other)
                .map(Self::Single)
                .ok_or_else(|| ValueError::UnsupportedExample(other.to_string())),
        }
    }
}
