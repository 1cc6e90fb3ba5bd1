// file: src/search/tantivy_engine.rs
// description: in-memory tantivy index with BM25 ranking
// reference: https://docs.rs/tantivy

use super::engine::{RankedIndex, RankingEngine};
use super::field::TextField;
use crate::error::Result;
use crate::models::Document;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, STORED, Schema, TEXT, Value};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};
use tracing::debug;

const ORDINAL_FIELD: &str = "ord";
const WRITER_HEAP_BYTES: usize = 50_000_000;

pub struct TantivyEngine {
    heap_bytes: usize,
}

impl TantivyEngine {
    pub fn with_heap_size(heap_bytes: usize) -> Self {
        Self { heap_bytes }
    }
}

impl Default for TantivyEngine {
    fn default() -> Self {
        Self::with_heap_size(WRITER_HEAP_BYTES)
    }
}

impl RankingEngine for TantivyEngine {
    fn name(&self) -> &'static str {
        "tantivy"
    }

    fn index(&self, documents: &[Document], fields: &[TextField]) -> Result<Box<dyn RankedIndex>> {
        let mut builder = Schema::builder();
        let ordinal = builder.add_u64_field(ORDINAL_FIELD, STORED);
        let text_fields: Vec<(TextField, Field)> = fields
            .iter()
            .map(|field| (*field, builder.add_text_field(field.as_str(), TEXT)))
            .collect();
        let schema = builder.build();

        let index = Index::create_in_ram(schema);
        // single indexing thread keeps the heap budget above tantivy's per-thread minimum
        let mut writer: IndexWriter = index.writer_with_num_threads(1, self.heap_bytes)?;

        for (position, document) in documents.iter().enumerate() {
            let mut doc = TantivyDocument::default();
            doc.add_u64(ordinal, position as u64);
            for (text_field, field) in &text_fields {
                doc.add_text(*field, text_field.value(document));
            }
            writer.add_document(doc)?;
        }
        writer.commit()?;

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        let parser = QueryParser::for_index(
            &index,
            text_fields.iter().map(|(_, field)| *field).collect(),
        );

        debug!("Built tantivy index over {} documents", documents.len());

        Ok(Box::new(TantivyIndex {
            reader,
            parser,
            ordinal,
        }))
    }
}

struct TantivyIndex {
    reader: IndexReader,
    parser: QueryParser,
    ordinal: Field,
}

impl RankedIndex for TantivyIndex {
    fn query(&self, text: &str, limit: usize) -> Result<Vec<usize>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let (query, errors) = self.parser.parse_query_lenient(text);
        if !errors.is_empty() {
            debug!("Lenient parse of {:?} ignored {} errors", text, errors.len());
        }

        let searcher = self.reader.searcher();
        let hits = searcher.search(&query, &TopDocs::with_limit(limit))?;

        let mut ordinals = Vec::with_capacity(hits.len());
        for (_score, address) in hits {
            let doc: TantivyDocument = searcher.doc(address)?;
            if let Some(position) = doc.get_first(self.ordinal).and_then(|v| v.as_u64()) {
                ordinals.push(position as usize);
            }
        }

        Ok(ordinals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<Document> {
        vec![
            Document::new("a.md", "hello world"),
            Document::new("b.md", "goodbye"),
            Document::new("guide/hello.md", "Hello, Hello and hello again"),
        ]
    }

    fn all_fields() -> Vec<TextField> {
        vec![TextField::Content, TextField::Filename]
    }

    #[test]
    fn test_matches_case_insensitively() {
        let index = TantivyEngine::default()
            .index(&docs(), &all_fields())
            .unwrap();

        let hits = index.query("HELLO", 10).unwrap();

        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&0));
        assert!(hits.contains(&2));
    }

    #[test]
    fn test_filename_field_is_searchable() {
        let index = TantivyEngine::default()
            .index(&docs(), &all_fields())
            .unwrap();

        assert_eq!(index.query("guide", 5).unwrap(), vec![2]);
    }

    #[test]
    fn test_respects_selected_fields() {
        let index = TantivyEngine::default()
            .index(&docs(), &[TextField::Content])
            .unwrap();

        assert!(index.query("guide", 5).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_query_does_not_fail() {
        let index = TantivyEngine::default()
            .index(&docs(), &all_fields())
            .unwrap();

        assert!(index.query("hello \"unterminated (", 5).is_ok());
    }

    #[test]
    fn test_zero_limit_and_empty_index() {
        let index = TantivyEngine::default()
            .index(&docs(), &all_fields())
            .unwrap();
        assert!(index.query("hello", 0).unwrap().is_empty());

        let empty = TantivyEngine::default().index(&[], &all_fields()).unwrap();
        assert!(empty.query("hello", 5).unwrap().is_empty());
    }
}
