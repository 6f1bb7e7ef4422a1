//! Server-local storage for persisted workbooks

use super::ExportError;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};
use url::Url;

const FILE_PREFIX: &str = "favourites_";
const FILE_SUFFIX: &str = ".xlsx";

/// A workbook written to the export directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedExport {
    pub filename: String,
    pub path: PathBuf,
}

/// Export directory with optional age-based cleanup
#[derive(Debug, Clone)]
pub struct ExportStore {
    dir: PathBuf,
    retention: Option<Duration>,
}

impl ExportStore {
    pub fn new(dir: impl Into<PathBuf>, retention: Option<Duration>) -> Self {
        Self {
            dir: dir.into(),
            retention,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `favourites_<32 hex chars>.xlsx` from 128 random bits
    pub fn generate_filename() -> String {
        let token: u128 = rand::thread_rng().gen();
        format!("{FILE_PREFIX}{token:032x}{FILE_SUFFIX}")
    }

    /// Whether a filename looks like one this store generated
    pub fn is_export_filename(name: &str) -> bool {
        name.strip_prefix(FILE_PREFIX)
            .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
            .is_some_and(|token| token.len() == 32 && token.chars().all(|c| c.is_ascii_hexdigit()))
    }

    /// Write a workbook under a fresh name, creating the directory if needed
    pub async fn persist(&self, bytes: &[u8]) -> Result<PersistedExport, ExportError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ExportError::io(&self.dir, e))?;

        if self.retention.is_some() {
            if let Err(e) = self.sweep_expired().await {
                warn!("Export cleanup failed: {}", e);
            }
        }

        let filename = Self::generate_filename();
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ExportError::io(&path, e))?;

        info!("Wrote export {} ({} bytes)", path.display(), bytes.len());

        Ok(PersistedExport { filename, path })
    }

    /// Remove generated workbooks older than the retention period.
    /// Returns how many files were removed.
    pub async fn sweep_expired(&self) -> Result<usize, ExportError> {
        let Some(retention) = self.retention else {
            return Ok(0);
        };

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(ExportError::io(&self.dir, e)),
        };

        let now = SystemTime::now();
        let mut removed = 0;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ExportError::io(&self.dir, e))?
        {
            let name = entry.file_name();
            if !Self::is_export_filename(&name.to_string_lossy()) {
                continue;
            }

            let modified = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) => {
                    debug!("Skipping {:?}: {}", name, e);
                    continue;
                }
            };

            let age = now.duration_since(modified).unwrap_or_default();
            if age >= retention {
                let path = entry.path();
                tokio::fs::remove_file(&path)
                    .await
                    .map_err(|e| ExportError::io(&path, e))?;
                debug!("Removed expired export {}", path.display());
                removed += 1;
            }
        }

        if removed > 0 {
            info!("Removed {} expired exports", removed);
        }

        Ok(removed)
    }

    /// Remove a persisted workbook that will never be handed out
    pub async fn discard(&self, export: &PersistedExport) {
        if let Err(e) = tokio::fs::remove_file(&export.path).await {
            warn!("Failed to remove {}: {}", export.path.display(), e);
        }
    }
}

/// Base URL that persisted workbooks are served under
pub fn download_base(scheme: &str, host: &str) -> Result<Url, ExportError> {
    Ok(Url::parse(&format!("{scheme}://{host}/static/"))?)
}

/// Absolute URL of a persisted workbook under `base`
pub fn download_url(base: &Url, filename: &str) -> Result<String, ExportError> {
    Ok(base.join(filename)?.to_string())
}
