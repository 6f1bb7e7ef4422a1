//! Favourites export
//!
//! Turns a list of favourites into an xlsx workbook and hands it out either
//! as the response body or as a file under the export directory.

pub mod codec;
mod records;
mod store;

pub use records::{DemoFavourites, FavouriteRecord, FavouritesSource, StaticFavourites};
pub use store::{download_base, download_url, ExportStore, PersistedExport};

use crate::config::{DeliveryMode, ExportSettings};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Filename offered to clients for streamed exports
pub const STREAM_FILENAME: &str = "favourites.xlsx";

/// MIME type of xlsx workbooks
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Export failure types
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to load favourites: {0}")]
    Source(String),
    #[error("failed to build workbook: {0}")]
    Encode(#[from] rust_xlsxwriter::XlsxError),
    #[error("failed to read workbook: {0}")]
    Decode(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid download URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ExportError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A generated workbook, ready to hand to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportArtifact {
    /// Bytes to send as the response body
    Streamed(Vec<u8>),
    /// Workbook written to the export directory
    Persisted(PersistedExport),
}

/// Builds favourites workbooks and delivers them per the configured mode
pub struct Exporter {
    source: Arc<dyn FavouritesSource>,
    delivery: DeliveryMode,
    store: ExportStore,
}

impl Exporter {
    pub fn new(source: Arc<dyn FavouritesSource>, delivery: DeliveryMode, store: ExportStore) -> Self {
        Self {
            source,
            delivery,
            store,
        }
    }

    pub fn from_settings(source: Arc<dyn FavouritesSource>, settings: &ExportSettings) -> Self {
        let store = ExportStore::new(
            settings.dir.clone(),
            settings.retention_secs.map(Duration::from_secs),
        );
        Self::new(source, settings.delivery, store)
    }

    pub fn delivery(&self) -> DeliveryMode {
        self.delivery
    }

    pub fn store(&self) -> &ExportStore {
        &self.store
    }

    /// Build the workbook and deliver it
    pub async fn export(&self) -> Result<ExportArtifact, ExportError> {
        let records = self.source.favourites().await?;
        let bytes = codec::encode(&records)?;
        debug!("Encoded {} favourites into {} bytes", records.len(), bytes.len());

        match self.delivery {
            DeliveryMode::Stream => Ok(ExportArtifact::Streamed(bytes)),
            DeliveryMode::Persist => Ok(ExportArtifact::Persisted(self.store.persist(&bytes).await?)),
        }
    }
}
