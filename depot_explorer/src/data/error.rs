use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::{BoxId, SlotId, WarehouseId};

/// Failures talking to the storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read fixture {}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("failed to start storage runtime: {0}")]
    Runtime(std::io::Error),

    #[error("warehouse {0} not found")]
    WarehouseNotFound(WarehouseId),

    #[error("slot {0} not found")]
    SlotNotFound(SlotId),

    #[error("box {0} not found")]
    BoxNotFound(BoxId),

    #[error("box code already in use: {0}")]
    DuplicateCode(String),
}
