// file: src/archive/mod.rs
// description: archive reading module exports
// reference: internal module structure

pub mod extractor;
pub mod path;

pub use extractor::{ArchiveExtractor, ExtractionStats, extract};
