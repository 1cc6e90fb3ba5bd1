// file: src/models/document.rs
// description: indexable document model extracted from an archive entry
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// A file record as it sits inside the source archive, before decoding.
#[derive(Debug, Clone)]
pub struct RawArchiveEntry {
    pub path: String,
    pub raw_bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub filename: String,
}

impl Document {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
        }
    }
}
