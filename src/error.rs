// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Archive not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Corrupt archive {}: {message}", path.display())]
    CorruptArchive { path: PathBuf, message: String },

    #[error("Invalid index field: {0}")]
    InvalidField(String),

    #[error("Upstream fetch failed for {url}: {message}")]
    UpstreamFetch { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Search engine error: {0}")]
    Engine(#[from] tantivy::TantivyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl SearchError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::CorruptArchive {
            path: path.into(),
            message: source.to_string(),
        }
    }
}
