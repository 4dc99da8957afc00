//! Remote example sources hosted on GitHub
//!
//! This module provides:
//! - Parsing of GitHub URLs and `owner/repo` shorthand
//! - Tarball download and extraction behind swappable traits
//! - The retrying installer that merges an example into a project

pub mod extract;
pub mod fetcher;
pub mod installer;
pub mod source;

pub use extract::{ArchiveExtractor, TarGzExtractor};
pub use fetcher::{archive_url, ArchiveFetcher, HttpArchiveFetcher};
pub use installer::{
    ExampleSourceInstaller, InstallOptions, InstallOutcome, Sleeper, TokioSleeper,
};
pub use source::GithubSource;
