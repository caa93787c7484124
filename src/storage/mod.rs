//! File-backed store for the single uploaded CSV.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

// ── Store trait ───────────────────────────────────────────────────────────────

/// Swappable store abstraction so the request handlers can be exercised
/// against test doubles.
#[async_trait]
pub trait ShareStore: Send + Sync {
    /// Raw bytes of the stored CSV, or `None` if nothing was uploaded yet.
    async fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored CSV wholly. Empty payloads are ignored and leave
    /// any prior content untouched.
    async fn write(&self, payload: &[u8]) -> Result<()>;
}

// ── Filesystem implementation ─────────────────────────────────────────────────

pub struct FsStore {
    path: PathBuf,
}

impl FsStore {
    pub fn new(upload_dir: impl Into<PathBuf>, file_name: &str) -> Self {
        Self { path: upload_dir.into().join(file_name) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ShareStore for FsStore {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", self.path)),
        }
    }

    async fn write(&self, payload: &[u8]) -> Result<()> {
        let dir = self
            .path
            .parent()
            .context("Store path has no parent directory")?;
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Could not create dir {:?}", dir))?;

        // Directory is prepared even for an ignored payload; only the file
        // write itself is skipped.
        if payload.is_empty() {
            debug!("Zero-length payload, keeping existing file");
            return Ok(());
        }

        // Write a sibling temp file, then rename, so a concurrent reader
        // never observes a half-written file.
        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, payload)
            .await
            .with_context(|| format!("Failed to write {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {:?}", self.path))?;

        info!("Stored {} bytes at {:?}", payload.len(), self.path);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
