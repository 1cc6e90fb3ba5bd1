// file: src/search/index.rs
// description: immutable searchable index over an extracted document set
// reference: internal data structures

use super::engine::{RankedIndex, RankingEngine};
use super::field::TextField;
use crate::archive::{ArchiveExtractor, ExtractionStats};
use crate::error::{Result, SearchError};
use crate::models::{Document, SearchResult};
use crate::utils::OperationTimer;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::debug;

/// A queryable index built once over a fixed set of documents.
///
/// The index owns its documents; every result is a copy of one of them.
pub struct SearchIndex {
    documents: Vec<Document>,
    fields: Vec<TextField>,
    engine_name: &'static str,
    ranked: Box<dyn RankedIndex>,
    built_at: DateTime<Utc>,
}

impl SearchIndex {
    /// Build over `documents`, indexing the named text fields.
    ///
    /// Field names must come from the document model (`content`,
    /// `filename`); anything else, or an empty set, is `InvalidField`.
    pub fn build<S: AsRef<str>>(
        documents: Vec<Document>,
        text_fields: &[S],
        engine: &dyn RankingEngine,
    ) -> Result<Self> {
        let fields = TextField::parse_set(text_fields)?;
        Self::build_with_fields(documents, fields, engine)
    }

    pub fn build_with_fields(
        documents: Vec<Document>,
        fields: Vec<TextField>,
        engine: &dyn RankingEngine,
    ) -> Result<Self> {
        if fields.is_empty() {
            return Err(SearchError::InvalidField(
                "at least one text field is required".to_string(),
            ));
        }

        let timer = OperationTimer::new("index build");
        let ranked = engine.index(&documents, &fields)?;
        timer.finish_with_count(documents.len());

        Ok(Self {
            documents,
            fields,
            engine_name: engine.name(),
            ranked,
            built_at: Utc::now(),
        })
    }

    /// Extract an archive and build over its documents in one step.
    pub fn from_archive(
        extractor: &ArchiveExtractor,
        archive_path: &Path,
        fields: Vec<TextField>,
        engine: &dyn RankingEngine,
    ) -> Result<(Self, ExtractionStats)> {
        let (documents, stats) = extractor.extract_with_stats(archive_path)?;
        let index = Self::build_with_fields(documents, fields, engine)?;
        Ok((index, stats))
    }

    /// Up to `limit` results, most relevant first.
    pub fn query(&self, text: &str, limit: usize) -> Result<Vec<SearchResult>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let ordinals = self.ranked.query(text, limit)?;
        let mut seen = vec![false; self.documents.len()];
        let mut results = Vec::with_capacity(ordinals.len());

        for ordinal in ordinals {
            let Some(document) = self.documents.get(ordinal) else {
                debug!("Engine returned unknown ordinal {}", ordinal);
                continue;
            };
            if std::mem::replace(&mut seen[ordinal], true) {
                continue;
            }
            results.push(SearchResult::new(results.len() + 1, document));
            if results.len() == limit {
                break;
            }
        }

        Ok(results)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine_name
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("documents", &self.documents.len())
            .field("fields", &self.fields)
            .field("engine", &self.engine_name)
            .field("built_at", &self.built_at)
            .finish()
    }
}
