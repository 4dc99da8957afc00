//! Runtime configuration resolved from the environment

pub mod settings;

pub use settings::ScaffoldSettings;
