// file: src/search/overlap.rs
// description: deterministic token-overlap ranking engine
// reference: term-frequency scoring over lowercase alphanumeric tokens

use super::engine::{RankedIndex, RankingEngine};
use super::field::TextField;
use crate::error::Result;
use crate::models::Document;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("TOKEN regex is valid");
}

pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Scores each document by how often the distinct query tokens occur in its
/// indexed fields. Ties keep document order.
#[derive(Debug, Default)]
pub struct OverlapEngine;

impl OverlapEngine {
    pub fn new() -> Self {
        Self
    }
}

impl RankingEngine for OverlapEngine {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn index(&self, documents: &[Document], fields: &[TextField]) -> Result<Box<dyn RankedIndex>> {
        let mut postings: HashMap<String, Vec<(usize, usize)>> = HashMap::new();

        for (position, document) in documents.iter().enumerate() {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for field in fields {
                for token in tokenize(field.value(document)) {
                    *counts.entry(token).or_insert(0) += 1;
                }
            }
            for (token, count) in counts {
                postings.entry(token).or_default().push((position, count));
            }
        }

        Ok(Box::new(OverlapIndex { postings }))
    }
}

struct OverlapIndex {
    postings: HashMap<String, Vec<(usize, usize)>>,
}

impl RankedIndex for OverlapIndex {
    fn query(&self, text: &str, limit: usize) -> Result<Vec<usize>> {
        let terms: HashSet<String> = tokenize(text).into_iter().collect();

        let mut scores: HashMap<usize, usize> = HashMap::new();
        for term in &terms {
            if let Some(hits) = self.postings.get(term) {
                for (position, count) in hits {
                    *scores.entry(*position).or_insert(0) += count;
                }
            }
        }

        let mut ranked: Vec<(usize, usize)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(limit);

        Ok(ranked.into_iter().map(|(position, _)| position).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("Hello, World! docs/intro.md"),
            vec!["hello", "world", "docs", "intro", "md"]
        );
    }

    #[test]
    fn test_ranks_by_term_frequency() {
        let docs = vec![
            Document::new("a.md", "rust"),
            Document::new("b.md", "rust rust rust"),
            Document::new("c.md", "python"),
        ];
        let index = OverlapEngine::new()
            .index(&docs, &[TextField::Content])
            .unwrap();

        assert_eq!(index.query("Rust", 10).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let docs = vec![
            Document::new("a.md", "same words"),
            Document::new("b.md", "same words"),
            Document::new("c.md", "same words"),
        ];
        let index = OverlapEngine::new()
            .index(&docs, &[TextField::Content, TextField::Filename])
            .unwrap();

        assert_eq!(index.query("same", 2).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_repeated_query_terms_count_once() {
        let docs = vec![
            Document::new("a.md", "alpha alpha"),
            Document::new("b.md", "alpha beta"),
        ];
        let index = OverlapEngine::new()
            .index(&docs, &[TextField::Content])
            .unwrap();

        assert_eq!(index.query("alpha alpha alpha beta", 5).unwrap(), vec![0, 1]);
    }
}
