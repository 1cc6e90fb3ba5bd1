// file: src/search/mod.rs
// description: search index construction, ranking engines and index cache
// reference: internal module structure

pub mod cache;
pub mod engine;
pub mod field;
pub mod index;
pub mod overlap;
pub mod tantivy_engine;

pub use cache::{IndexCache, IndexSource};
pub use engine::{EngineKind, RankedIndex, RankingEngine};
pub use field::TextField;
pub use index::SearchIndex;
pub use overlap::OverlapEngine;
pub use tantivy_engine::TantivyEngine;
