// file: src/search/field.rs
// description: closed set of document fields an index can be built over
// reference: internal data structures

use crate::error::{Result, SearchError};
use crate::models::Document;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextField {
    Content,
    Filename,
}

impl TextField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Content => "content",
            TextField::Filename => "filename",
        }
    }

    /// Borrow this field's text from a document.
    pub fn value<'a>(&self, document: &'a Document) -> &'a str {
        match self {
            TextField::Content => &document.content,
            TextField::Filename => &document.filename,
        }
    }

    /// Parse a non-empty set of field names, keeping first-seen order and
    /// dropping duplicates.
    pub fn parse_set<S: AsRef<str>>(names: &[S]) -> Result<Vec<TextField>> {
        let mut fields = Vec::with_capacity(names.len());
        for name in names {
            let field: TextField = name.as_ref().parse()?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }

        if fields.is_empty() {
            return Err(SearchError::InvalidField(
                "at least one text field is required".to_string(),
            ));
        }

        Ok(fields)
    }
}

impl FromStr for TextField {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "content" => Ok(TextField::Content),
            "filename" => Ok(TextField::Filename),
            other => Err(SearchError::InvalidField(other.to_string())),
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_fields() {
        assert_eq!("content".parse::<TextField>().unwrap(), TextField::Content);
        assert_eq!("filename".parse::<TextField>().unwrap(), TextField::Filename);
    }

    #[test]
    fn test_unknown_field_is_invalid() {
        let err = "title".parse::<TextField>().unwrap_err();
        assert!(matches!(err, SearchError::InvalidField(name) if name == "title"));
    }

    #[test]
    fn test_parse_set_dedups_and_rejects_empty() {
        let fields = TextField::parse_set(&["filename", "content", "filename"]).unwrap();
        assert_eq!(fields, vec![TextField::Filename, TextField::Content]);

        let empty: [&str; 0] = [];
        assert!(matches!(
            TextField::parse_set(&empty),
            Err(SearchError::InvalidField(_))
        ));
    }

    #[test]
    fn test_value_reads_document_field() {
        let doc = Document::new("a.md", "body");
        assert_eq!(TextField::Filename.value(&doc), "a.md");
        assert_eq!(TextField::Content.value(&doc), "body");
    }
}
