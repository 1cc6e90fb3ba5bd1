// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod archive;
pub mod config;
pub mod error;
pub mod mcp;
pub mod models;
pub mod scraper;
pub mod search;
pub mod utils;

pub use archive::{ArchiveExtractor, ExtractionStats, extract};
pub use config::{ArchiveConfig, Config, ScraperConfig, SearchConfig, ServerConfig};
pub use error::{Result, SearchError};
pub use mcp::DocsSearchMcp;
pub use models::{Document, RawArchiveEntry, SearchResult, render_results};
pub use scraper::ReaderClient;
pub use search::{
    EngineKind, IndexCache, IndexSource, OverlapEngine, RankedIndex, RankingEngine, SearchIndex,
    TantivyEngine, TextField,
};
pub use utils::{OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _extractor = ArchiveExtractor::default();
        let _engine = EngineKind::default().engine();
    }
}
