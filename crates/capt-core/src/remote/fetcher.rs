//! Archive downloads for remote example sources
//!
//! The installer only sees the [`ArchiveFetcher`] trait so tests can swap the
//! network out. [`HttpArchiveFetcher`] is the production implementation.

use super::source::GithubSource;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Host serving repository tarballs
const CODELOAD_BASE: &str = "https://codeload.github.com";

/// Default per-request timeout
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Downloads a gzip-compressed tarball
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Fetch the archive body. Transport errors and non-2xx responses are errors.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Build the codeload tarball URL for a parsed source
///
/// The ref is pushed as a single path segment, so `/` inside it is escaped.
pub fn archive_url(source: &GithubSource) -> Result<Url> {
    let mut url = Url::parse(CODELOAD_BASE)?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", CODELOAD_BASE))?
        .pop_if_empty()
        .push(source.owner())
        .push(source.repo())
        .push("tar.gz")
        .push(source.git_ref());
    Ok(url)
}

/// Fetches archives over HTTPS with reqwest
pub struct HttpArchiveFetcher {
    client: reqwest::Client,
}

impl HttpArchiveFetcher {
    /// Create a new fetcher with a custom user agent and request timeout
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C, timeout: Duration) -> Result<Self> {
        Self::new(config.user_agent(), timeout)
    }
}

#[async_trait]
impl ArchiveFetcher for HttpArchiveFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        tracing::debug!(%url, "fetching example archive");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch archive from {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!(
                "GitHub archive request failed ({} {}).",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read archive body from {}", url))?;
        Ok(bytes.to_vec())
    }
}
