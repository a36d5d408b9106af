//! FILENAME: persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}
