//! Terminal output using cliclack (Charm-style inline log lines)
//!
//! This module is optional and only available when the `tui` feature is enabled.
//! It never prompts; every choice arrives through [`CreateArgs`].

#[cfg(feature = "tui")]
mod session;

#[cfg(feature = "tui")]
pub use session::{run, CreateArgs};
