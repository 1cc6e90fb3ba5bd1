// file: src/utils/validation.rs
// description: input validation helpers for tool and cli arguments
// reference: input validation patterns

use crate::error::{Result, SearchError};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SearchError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_query(query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(SearchError::Validation("Query is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_archive_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(SearchError::NotFound {
                path: path.to_path_buf(),
            });
        }

        if !path.is_file() {
            return Err(SearchError::Validation(format!(
                "Archive path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_query() {
        assert!(Validator::validate_query("demo").is_ok());
        assert!(Validator::validate_query("").is_err());
        assert!(Validator::validate_query("   ").is_err());
    }

    #[test]
    fn test_validate_archive_path() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("main.zip");
        fs::write(&file, b"PK").unwrap();

        assert!(Validator::validate_archive_path(&file).is_ok());
        assert!(matches!(
            Validator::validate_archive_path(&temp.path().join("nope.zip")),
            Err(SearchError::NotFound { .. })
        ));
        assert!(matches!(
            Validator::validate_archive_path(temp.path()),
            Err(SearchError::Validation(_))
        ));
    }
}
