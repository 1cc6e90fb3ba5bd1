// file: src/models/search_result.rs
// description: Ranked search result model and text rendering
// reference: Used for ranked documentation search results

use super::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 1-based position in the result list, 1 is the most relevant
    pub rank: usize,

    /// Path of the file relative to the archive's top-level directory
    pub filename: String,

    /// Full decoded file content
    pub content: String,
}

impl SearchResult {
    pub fn new(rank: usize, document: &Document) -> Self {
        Self {
            rank,
            filename: document.filename.clone(),
            content: document.content.clone(),
        }
    }

    /// First `max_chars` characters of the content on a single line.
    pub fn preview(&self, max_chars: usize) -> String {
        self.content
            .chars()
            .take(max_chars)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect()
    }

    /// Format as a numbered entry for tool output
    pub fn format_summary(&self, max_chars: usize) -> String {
        format!(
            "{}. File: {}\n   Preview: {}...\n\n",
            self.rank,
            self.filename,
            self.preview(max_chars)
        )
    }
}

/// Render a full result listing the way the documentation search tool returns it.
pub fn render_results(query: &str, results: &[SearchResult], max_chars: usize) -> String {
    let mut output = format!("Search results for '{}':\n\n", query);
    for result in results {
        output.push_str(&result.format_summary(max_chars));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_search_result_creation() {
        let doc = Document::new("docs/readme.md", "Some content");
        let result = SearchResult::new(1, &doc);

        assert_eq!(result.rank, 1);
        assert_eq!(result.filename, "docs/readme.md");
        assert_eq!(result.content, "Some content");
    }

    #[test]
    fn test_preview_flattens_newlines_and_counts_chars() {
        let doc = Document::new("a.md", "héllo\nwörld\nagain");
        let result = SearchResult::new(1, &doc);

        assert_eq!(result.preview(11), "héllo wörld");
        assert_eq!(result.preview(100), "héllo wörld again");
    }

    #[test]
    fn test_render_results() {
        let results = vec![
            SearchResult::new(1, &Document::new("a.md", "hello\nworld")),
            SearchResult::new(2, &Document::new("b.md", "hello again")),
        ];

        let rendered = render_results("hello", &results, 300);

        assert_eq!(
            rendered,
            "Search results for 'hello':\n\n\
             1. File: a.md\n   Preview: hello world...\n\n\
             2. File: b.md\n   Preview: hello again...\n\n"
        );
    }

    #[test]
    fn test_render_empty_results() {
        assert_eq!(
            render_results("nothing", &[], 300),
            "Search results for 'nothing':\n\n"
        );
    }
}
