// file: src/search/engine.rs
// description: ranking engine abstraction shared by all index backends
// reference: internal module structure

use super::field::TextField;
use super::overlap::OverlapEngine;
use super::tantivy_engine::TantivyEngine;
use crate::error::Result;
use crate::models::Document;
use serde::{Deserialize, Serialize};

/// A text-ranking backend.
///
/// Engines see documents only while indexing. Queries answer with ordinals
/// into the slice that was indexed, best match first, so callers always
/// resolve hits against their own copy of the document set.
pub trait RankingEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn index(&self, documents: &[Document], fields: &[TextField]) -> Result<Box<dyn RankedIndex>>;
}

/// A built, read-only engine index.
pub trait RankedIndex: Send + Sync {
    /// Up to `limit` document ordinals ordered by decreasing relevance.
    /// No match yields an empty vector.
    fn query(&self, text: &str, limit: usize) -> Result<Vec<usize>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Tantivy,
    Overlap,
}

impl EngineKind {
    pub fn engine(&self) -> Box<dyn RankingEngine> {
        match self {
            EngineKind::Tantivy => Box::new(TantivyEngine::default()),
            EngineKind::Overlap => Box::new(OverlapEngine::new()),
        }
    }
}
