use dify_errors::AppError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Session file {path} is not a JSON object of strings")]
    Corrupt { path: PathBuf },
    #[error("Failed to encode session data: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<StorageError> for AppError {
    fn from(error: StorageError) -> Self {
        AppError::Storage(error.to_string())
    }
}
