//! Tarball extraction for remote example sources
//!
//! GitHub tarballs wrap everything in a single `<repo>-<ref>/` directory. The
//! extractor keeps that layout; locating the root is the installer's job.

use anyhow::{Context, Result};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Component, Path};
use tar::{Archive, EntryType};

/// Maximum number of entries allowed in a tarball
const MAX_ENTRY_COUNT: usize = 20_000;

/// Maximum total extracted size (500 MB)
const MAX_EXTRACTED_SIZE: u64 = 500_000_000;

/// Unpacks a downloaded archive into a directory
#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    async fn extract(&self, archive_path: &Path, extract_dir: &Path) -> Result<()>;
}

/// Native gzip + tar extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzExtractor;

#[async_trait]
impl ArchiveExtractor for TarGzExtractor {
    async fn extract(&self, archive_path: &Path, extract_dir: &Path) -> Result<()> {
        let archive_path = archive_path.to_path_buf();
        let extract_dir = extract_dir.to_path_buf();

        tokio::task::spawn_blocking(move || extract_tar_gz(&archive_path, &extract_dir))
            .await
            .context("Archive extraction task panicked")?
    }
}

/// Extract a `.tar.gz` file into `dest`
///
/// Rejects absolute paths, `..` components and device or fifo entries.
/// Symlinks and hard links are skipped, so the extracted tree only ever
/// holds regular files and directories.
pub fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive {}", archive_path.display()))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.set_preserve_permissions(false);

    let dest = dest
        .canonicalize()
        .with_context(|| format!("Failed to resolve extraction directory {}", dest.display()))?;

    let mut entry_count = 0usize;
    let mut total_size: u64 = 0;

    let entries = archive
        .entries()
        .context("Failed to extract remote archive: unreadable tarball")?;

    for entry in entries {
        let mut entry = entry.context("Failed to extract remote archive: corrupt entry")?;

        entry_count += 1;
        if entry_count > MAX_ENTRY_COUNT {
            anyhow::bail!("Remote archive exceeds maximum entry count ({MAX_ENTRY_COUNT}).");
        }

        let entry_type = entry.header().entry_type();
        match entry_type {
            EntryType::Regular | EntryType::Directory => {}
            // Metadata headers carry no content of their own
            EntryType::XGlobalHeader | EntryType::XHeader | EntryType::GNULongName => continue,
            EntryType::Symlink | EntryType::Link => {
                tracing::debug!(
                    path = %entry.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    "skipping link entry in remote archive"
                );
                continue;
            }
            other => {
                let path = entry
                    .path()
                    .map_or_else(|_| "<unknown>".to_string(), |p| p.display().to_string());
                anyhow::bail!("Remote archive contains unsupported entry {path} ({other:?}).");
            }
        }

        total_size = total_size.saturating_add(entry.header().size().unwrap_or(0));
        if total_size > MAX_EXTRACTED_SIZE {
            anyhow::bail!(
                "Remote archive exceeds maximum extracted size ({MAX_EXTRACTED_SIZE} bytes)."
            );
        }

        let entry_path = entry
            .path()
            .context("Failed to extract remote archive: unreadable entry path")?
            .into_owned();
        validate_entry_path(&entry_path)?;

        let target = dest.join(&entry_path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        entry
            .unpack(&target)
            .with_context(|| format!("Failed to unpack {}", entry_path.display()))?;
    }

    if entry_count == 0 {
        anyhow::bail!("Remote archive is empty.");
    }

    Ok(())
}

fn validate_entry_path(path: &Path) -> Result<()> {
    let unsafe_component = path.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });

    if path.is_absolute() || unsafe_component {
        anyhow::bail!(
            "Remote archive entry escapes extraction directory: {}",
            path.display()
        );
    }

    Ok(())
}
