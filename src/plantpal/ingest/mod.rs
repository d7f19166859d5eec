//! # Photo Ingestion
//!
//! Turns a raw image (a camera capture or a picked file) into a [`Photo`]:
//!
//! 1. **Read** the source bytes. Unreadable or empty input fails with
//!    [`IngestError::ImageRead`].
//! 2. **Re-encode** within the configured bounds (0.5 MB, 1024px on the
//!    longer side, quality 80 by default) via a [`Compressor`]. This step
//!    never fails the pipeline: on any error the original bytes are used.
//! 3. **Inline** the result as a `data:` URL.
//! 4. **Stamp** it with today's date.
//!
//! Ingestion is all-or-nothing per image and never touches a record. Use
//! [`Ingestor::ingest_into`] to ingest several images at once; each one is
//! appended to the plant as soon as it is ready, and a failure for one image
//! does not affect the others.

use crate::error::PlantError;
use crate::model::{self, Photo, Plant, PlantId};
use crate::store::{RecordStore, SnapshotBackend};
use image::ImageFormat;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{self, JoinSet};
use tracing::{info, warn};

pub mod compress;
pub mod data_url;

pub use compress::{CompressionOptions, Compressor, JpegCompressor};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unable to read image {source_label}: {reason}")]
    ImageRead {
        source_label: String,
        reason: String,
    },

    #[error("Compression failed: {0}")]
    Compression(String),

    #[error("Invalid data URL: {0}")]
    DataUrl(String),

    #[error("Ingestion of {source_label} stopped: {reason}")]
    Task {
        source_label: String,
        reason: String,
    },
}

/// Where a new photo comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A file chosen from disk.
    File(PathBuf),
    /// Bytes straight from a camera, with the mime type it reported.
    Capture { bytes: Vec<u8>, mime: Option<String> },
}

impl ImageSource {
    pub fn label(&self) -> String {
        match self {
            ImageSource::File(path) => path.display().to_string(),
            ImageSource::Capture { bytes, .. } => format!("camera capture ({} bytes)", bytes.len()),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::File(path)
    }
}

#[derive(Debug)]
pub struct IngestFailure {
    pub label: String,
    pub error: PlantError,
}

/// Outcome of ingesting several images into one plant.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Labels of the sources that were appended, in completion order.
    pub appended: Vec<String>,
    pub failures: Vec<IngestFailure>,
    /// Set when photos were appended in memory but the snapshot write failed.
    pub unsaved: Option<String>,
    /// The plant after all appends.
    pub plant: Option<Plant>,
}

impl IngestReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.unsaved.is_none()
    }
}

#[derive(Clone)]
pub struct Ingestor {
    compressor: Arc<dyn Compressor>,
    options: CompressionOptions,
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(CompressionOptions::default())
    }
}

impl Ingestor {
    pub fn new(options: CompressionOptions) -> Self {
        Self::with_compressor(Arc::new(JpegCompressor), options)
    }

    pub fn with_compressor(compressor: Arc<dyn Compressor>, options: CompressionOptions) -> Self {
        Self {
            compressor,
            options,
        }
    }

    pub fn options(&self) -> &CompressionOptions {
        &self.options
    }

    /// Produce a Photo from `source`. Must run inside a tokio runtime.
    pub async fn ingest(&self, source: ImageSource) -> Result<Photo, IngestError> {
        let label = source.label();
        let (bytes, hint) = read_source(source).await?;
        let original: Arc<[u8]> = bytes.into();

        let compressor = Arc::clone(&self.compressor);
        let options = self.options;
        let input = Arc::clone(&original);
        let joined =
            tokio::task::spawn_blocking(move || compressor.compress(&input, &options)).await;

        let payload = match joined {
            Ok(Ok(compressed)) => {
                info!(
                    source = %label,
                    original_kb = original.len() / 1024,
                    compressed_kb = compressed.len() / 1024,
                    "image compressed"
                );
                compressed
            }
            Ok(Err(e)) => {
                warn!(source = %label, error = %e, "compression failed, keeping original image");
                original.to_vec()
            }
            Err(e) => {
                warn!(source = %label, error = %e, "compression task aborted, keeping original image");
                original.to_vec()
            }
        };

        let mime = data_url::mime_for(&payload, hint.as_deref());
        Ok(Photo::new(data_url::encode(&payload, &mime), model::today()))
    }

    /// Ingest every source concurrently, appending each photo to plant `id`
    /// as it completes.
    ///
    /// Fails up front with `PlantNotFound` if the plant does not exist.
    pub async fn ingest_into<B: SnapshotBackend>(
        &self,
        store: &mut RecordStore<B>,
        id: PlantId,
        sources: Vec<ImageSource>,
    ) -> Result<IngestReport, PlantError> {
        if store.get(id).is_none() {
            return Err(PlantError::PlantNotFound(id));
        }

        let mut tasks = JoinSet::new();
        let mut labels: HashMap<task::Id, String> = HashMap::new();
        for source in sources {
            let ingestor = self.clone();
            let label = source.label();
            let handle = tasks.spawn(async move { ingestor.ingest(source).await });
            labels.insert(handle.id(), label);
        }

        Ok(collect_into(store, id, tasks, labels).await)
    }
}

type IngestTasks = JoinSet<Result<Photo, IngestError>>;

/// Append each finished photo to plant `id` in completion order. `labels`
/// maps task ids back to the source they were reading.
async fn collect_into<B: SnapshotBackend>(
    store: &mut RecordStore<B>,
    id: PlantId,
    mut tasks: IngestTasks,
    mut labels: HashMap<task::Id, String>,
) -> IngestReport {
    let mut report = IngestReport::default();
    while let Some(joined) = tasks.join_next_with_id().await {
        let (label, result) = match joined {
            Ok((task_id, result)) => (labels.remove(&task_id).unwrap_or_default(), result),
            Err(e) => {
                let label = labels.remove(&e.id()).unwrap_or_default();
                warn!(source = %label, error = %e, "image ingestion task failed");
                report.failures.push(IngestFailure {
                    error: IngestError::Task {
                        source_label: label.clone(),
                        reason: e.to_string(),
                    }
                    .into(),
                    label,
                });
                continue;
            }
        };

        let photo = match result {
            Ok(photo) => photo,
            Err(e) => {
                warn!(source = %label, error = %e, "image ingestion failed");
                report.failures.push(IngestFailure {
                    label,
                    error: e.into(),
                });
                continue;
            }
        };

        match store.append_photo(id, photo) {
            Ok(_) => report.appended.push(label),
            Err(PlantError::Persistence(reason)) => {
                report.appended.push(label);
                report.unsaved = Some(reason);
            }
            Err(error) => report.failures.push(IngestFailure { label, error }),
        }
    }

    report.plant = store.get(id).cloned();
    report
}

async fn read_source(source: ImageSource) -> Result<(Vec<u8>, Option<String>), IngestError> {
    let label = source.label();
    let (bytes, hint) = match source {
        ImageSource::File(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| IngestError::ImageRead {
                    source_label: label.clone(),
                    reason: e.to_string(),
                })?;
            let hint = ImageFormat::from_path(&path)
                .ok()
                .map(|f| f.to_mime_type().to_string());
            (bytes, hint)
        }
        ImageSource::Capture { bytes, mime } => (bytes, mime),
    };

    if bytes.is_empty() {
        return Err(IngestError::ImageRead {
            source_label: label,
            reason: "image is empty".to_string(),
        });
    }
    Ok((bytes, hint))
}
