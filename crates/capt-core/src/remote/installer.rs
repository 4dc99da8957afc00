//! Remote example installation with bounded retry
//!
//! Each attempt downloads the source's tarball into a fresh temporary
//! directory, extracts it, and merges the requested sub directory into the
//! target. Ordinary failures are retried with linear backoff and, once the
//! attempts run out, reported in the [`InstallOutcome`] instead of as an
//! error so the caller can fall back to the bundled examples.

use super::extract::{ArchiveExtractor, TarGzExtractor};
use super::fetcher::{archive_url, ArchiveFetcher, HttpArchiveFetcher};
use super::source::GithubSource;
use crate::config::ScaffoldSettings;
use crate::error::InstallError;
use crate::paths::{is_within, normalize_lexically};
use crate::product::ProductConfig;
use crate::templates::copier::{copy_tree, CopyMode};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 400;

const ARCHIVE_FILE_NAME: &str = "source.tar.gz";
const EXTRACT_DIR_NAME: &str = "extract";
const DEFAULT_TEMP_PREFIX: &str = "capt-example-source-";

/// Waits between attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Per-call options; unset fields fall back to the installer's defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    pub absolute_target_path: PathBuf,
    pub example_source: String,
    pub max_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

impl InstallOptions {
    pub fn new(absolute_target_path: impl Into<PathBuf>, example_source: impl Into<String>) -> Self {
        Self {
            absolute_target_path: absolute_target_path.into(),
            example_source: example_source.into(),
            max_attempts: None,
            retry_delay_ms: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = Some(retry_delay_ms);
        self
    }
}

/// Result of an install call
///
/// `applied()` holds exactly when there is no fallback reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    source: String,
    attempts: u32,
    fallback_reason: Option<String>,
}

impl InstallOutcome {
    fn applied_after(source: String, attempts: u32) -> Self {
        Self {
            source,
            attempts,
            fallback_reason: None,
        }
    }

    fn fallback(source: String, attempts: u32, reason: String) -> Self {
        Self {
            source,
            attempts,
            fallback_reason: Some(reason),
        }
    }

    /// Normalized source that was requested
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn applied(&self) -> bool {
        self.fallback_reason.is_none()
    }

    /// Attempts actually made
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Last attempt's error message when nothing was applied
    pub fn fallback_reason(&self) -> Option<&str> {
        self.fallback_reason.as_deref()
    }
}

/// Downloads GitHub examples and merges them into a project
pub struct ExampleSourceInstaller {
    fetcher: Box<dyn ArchiveFetcher>,
    extractor: Box<dyn ArchiveExtractor>,
    sleeper: Box<dyn Sleeper>,
    temp_prefix: String,
    max_attempts: u32,
    retry_delay_ms: u64,
}

impl ExampleSourceInstaller {
    pub fn new(
        fetcher: Box<dyn ArchiveFetcher>,
        extractor: Box<dyn ArchiveExtractor>,
        sleeper: Box<dyn Sleeper>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            sleeper,
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }

    /// Production wiring: HTTPS fetcher, native extractor, tokio timer
    pub fn from_config<C: ProductConfig>(config: &C, settings: &ScaffoldSettings) -> Result<Self> {
        let fetcher = HttpArchiveFetcher::from_config(config, settings.http_timeout)?;
        Ok(Self::new(Box::new(fetcher), Box::new(TarGzExtractor), Box::new(TokioSleeper))
            .with_temp_prefix(config.temp_dir_prefix())
            .with_retry_policy(settings.max_attempts, settings.retry_delay_ms))
    }

    pub fn with_temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    /// Defaults used when [`InstallOptions`] leaves the policy unset
    pub fn with_retry_policy(mut self, max_attempts: u32, retry_delay_ms: u64) -> Self {
        self.max_attempts = max_attempts;
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    /// Install `options.example_source` into `options.absolute_target_path`
    ///
    /// Only a malformed source or a zero attempt bound is an error.
    /// Download, extraction and copy failures end up in the outcome.
    pub async fn install(&self, options: &InstallOptions) -> Result<InstallOutcome, InstallError> {
        let source = GithubSource::parse(&options.example_source)?;
        let max_attempts = options.max_attempts.unwrap_or(self.max_attempts);
        let retry_delay_ms = options.retry_delay_ms.unwrap_or(self.retry_delay_ms);

        if max_attempts == 0 {
            return Err(InstallError::InvalidMaxAttempts);
        }

        let mut last_error = None;

        for attempt in 1..=max_attempts {
            tracing::debug!(source = %source, attempt, max_attempts, "installing remote example");

            match self
                .download_and_apply(&source, &options.absolute_target_path)
                .await
            {
                Ok(()) => {
                    tracing::info!(source = %source, attempt, "remote example applied");
                    return Ok(InstallOutcome::applied_after(
                        source.normalized_source().to_string(),
                        attempt,
                    ));
                }
                Err(e) => {
                    let message = format!("{:#}", e);
                    tracing::warn!(source = %source, attempt, error = %message, "remote example attempt failed");
                    last_error = Some(e);
                }
            }

            if attempt < max_attempts {
                let delay = Duration::from_millis(retry_delay_ms.saturating_mul(u64::from(attempt)));
                self.sleeper.sleep(delay).await;
            }
        }

        let reason = last_error
            .map(|e| format!("{:#}", e))
            .unwrap_or_else(|| "Remote example source could not be applied.".to_string());

        Ok(InstallOutcome::fallback(
            source.normalized_source().to_string(),
            max_attempts,
            reason,
        ))
    }

    async fn download_and_apply(&self, source: &GithubSource, target: &Path) -> Result<()> {
        // Removed on drop, whichever way this returns
        let scratch = tempfile::Builder::new()
            .prefix(&self.temp_prefix)
            .tempdir()
            .context("Failed to create temporary directory")?;

        let archive_path = scratch.path().join(ARCHIVE_FILE_NAME);
        let extract_dir = scratch.path().join(EXTRACT_DIR_NAME);
        fs::create_dir_all(&extract_dir)
            .with_context(|| format!("Failed to create {}", extract_dir.display()))?;

        let url = archive_url(source)?;
        let bytes = self.fetcher.fetch(&url).await?;
        tokio::fs::write(&archive_path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", archive_path.display()))?;

        self.extractor.extract(&archive_path, &extract_dir).await?;

        let extracted_root = find_extracted_root(&extract_dir)?;
        let source_dir = resolve_source_dir(&extracted_root, source.sub_path())?;

        let target = target.to_path_buf();
        let copied = tokio::task::spawn_blocking(move || {
            copy_tree(&source_dir, &target, CopyMode::Overwrite)
        })
        .await
        .context("Copy task panicked")??;

        tracing::debug!(files = copied.len(), "copied remote example files");
        Ok(())
    }
}

/// First top-level directory of the extraction, by name
fn find_extracted_root(extract_dir: &Path) -> Result<PathBuf> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(extract_dir)
        .with_context(|| format!("Failed to read {}", extract_dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .map(|entry| entry.path())
        .collect();
    dirs.sort();

    dirs.into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Remote archive extraction produced no files."))
}

/// Resolve `sub_path` under `extracted_root`, refusing anything outside it
fn resolve_source_dir(extracted_root: &Path, sub_path: &str) -> Result<PathBuf> {
    let candidate = normalize_lexically(&extracted_root.join(sub_path));
    if !is_within(extracted_root, &candidate) {
        anyhow::bail!("Remote source path escapes extracted archive.");
    }

    let label = if sub_path.is_empty() { "." } else { sub_path };
    let metadata = fs::metadata(&candidate)
        .with_context(|| format!("Remote source path does not exist: {}", label))?;
    if !metadata.is_dir() {
        anyhow::bail!("Remote source path is not a directory: {}", label);
    }

    // Symlinked directories inside the archive must not lead outside either
    let canonical_root = extracted_root
        .canonicalize()
        .context("Failed to resolve extracted archive root")?;
    let canonical = candidate
        .canonicalize()
        .with_context(|| format!("Failed to resolve remote source path: {}", label))?;
    if !is_within(&canonical_root, &canonical) {
        anyhow::bail!("Remote source path escapes extracted archive.");
    }

    Ok(canonical)
}
