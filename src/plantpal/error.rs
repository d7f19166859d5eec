use crate::ingest::IngestError;
use crate::model::PlantId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantError {
    #[error("Plant not found: {0}")]
    PlantNotFound(PlantId),

    #[error("{0}")]
    Validation(String),

    #[error("Thumbnail index {index} is out of range for {len} photo(s)")]
    ThumbnailOutOfRange { index: usize, len: usize },

    #[error("Photo index {index} is out of range for {len} photo(s)")]
    PhotoOutOfRange { index: usize, len: usize },

    #[error("Snapshot not saved: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, PlantError>;
