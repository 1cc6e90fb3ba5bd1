// file: src/archive/extractor.rs
// description: Zip archive walking and markdown document extraction
// reference: https://docs.rs/zip

use super::path::{decode_lossy, has_extension, strip_top_level};
use crate::config::ArchiveConfig;
use crate::error::{Result, SearchError};
use crate::models::{Document, RawArchiveEntry};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};
use zip::ZipArchive;

const MAX_SIZE_HINT: u64 = 1 << 20;

/// Counters collected while walking an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub entries_seen: usize,
    pub documents_extracted: usize,
    pub entries_skipped: usize,
    pub lossy_entries: usize,
}

pub struct ArchiveExtractor {
    extensions: Vec<String>,
}

impl ArchiveExtractor {
    pub fn new(config: ArchiveConfig) -> Self {
        Self {
            extensions: config.extensions,
        }
    }

    /// Markdown documents in archive order.
    pub fn extract(&self, archive_path: &Path) -> Result<Vec<Document>> {
        self.extract_with_stats(archive_path)
            .map(|(documents, _)| documents)
    }

    pub fn extract_with_stats(&self, archive_path: &Path) -> Result<(Vec<Document>, ExtractionStats)> {
        if !archive_path.exists() {
            return Err(SearchError::NotFound {
                path: archive_path.to_path_buf(),
            });
        }

        info!("Extracting documents from: {}", archive_path.display());

        let file = File::open(archive_path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .map_err(|e| SearchError::corrupt(archive_path, e))?;

        let mut documents = Vec::new();
        let mut stats = ExtractionStats::default();

        for index in 0..archive.len() {
            stats.entries_seen += 1;

            // selection uses central-directory metadata only; skipped entries are never opened
            let path = archive
                .name_for_index(index)
                .map(str::to_string)
                .ok_or_else(|| SearchError::CorruptArchive {
                    path: archive_path.to_path_buf(),
                    message: format!("missing central directory record {}", index),
                })?;

            if !has_extension(&path, &self.extensions) {
                debug!("Skipping entry: {}", path);
                stats.entries_skipped += 1;
                continue;
            }

            let mut entry = archive
                .by_index(index)
                .map_err(|e| SearchError::corrupt(archive_path, e))?;

            let mut raw_bytes = Vec::with_capacity(read_buffer_hint(entry.size()));
            entry.read_to_end(&mut raw_bytes).map_err(|e| SearchError::CorruptArchive {
                path: archive_path.to_path_buf(),
                message: format!("failed to read entry {}: {}", path, e),
            })?;

            let (document, lossy) = Self::decode(RawArchiveEntry { path, raw_bytes });
            if lossy {
                debug!("Dropped invalid UTF-8 in: {}", document.filename);
                stats.lossy_entries += 1;
            }

            debug!("Indexed: {}", document.filename);
            documents.push(document);
        }

        stats.documents_extracted = documents.len();
        info!(
            "Extracted {} documents ({} entries skipped, {} lossy)",
            stats.documents_extracted, stats.entries_skipped, stats.lossy_entries
        );

        Ok((documents, stats))
    }

    fn decode(entry: RawArchiveEntry) -> (Document, bool) {
        let (content, lossy) = decode_lossy(&entry.raw_bytes);
        let filename = strip_top_level(&entry.path);
        (Document { content, filename }, lossy)
    }
}

/// Initial buffer size for an entry; declared sizes come from the archive and are untrusted.
fn read_buffer_hint(declared: u64) -> usize {
    declared.min(MAX_SIZE_HINT) as usize
}

impl Default for ArchiveExtractor {
    fn default() -> Self {
        Self {
            extensions: vec![".md".to_string(), ".mdx".to_string()],
        }
    }
}

/// Extract markdown documents with the default `.md`/`.mdx` selection.
pub fn extract(archive_path: impl AsRef<Path>) -> Result<Vec<Document>> {
    ArchiveExtractor::default().extract(archive_path.as_ref())
}
