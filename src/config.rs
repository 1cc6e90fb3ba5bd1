// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, SearchError};
use crate::search::{EngineKind, TextField};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub search: SearchConfig,
    pub scraper: ScraperConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    pub path: PathBuf,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub engine: EngineKind,
    pub text_fields: Vec<String>,
    pub default_results: usize,
    pub preview_chars: usize,
    #[serde(default = "default_warm_on_start")]
    pub warm_on_start: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScraperConfig {
    pub reader_base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub name: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

fn default_warm_on_start() -> bool {
    true
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MDSEARCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            archive: ArchiveConfig {
                path: PathBuf::from("/tmp/main.zip"),
                extensions: vec![".md".to_string(), ".mdx".to_string()],
            },
            search: SearchConfig {
                engine: EngineKind::Tantivy,
                text_fields: vec!["content".to_string(), "filename".to_string()],
                default_results: 5,
                preview_chars: 300,
                warm_on_start: true,
            },
            scraper: ScraperConfig {
                reader_base_url: "https://r.jina.ai/".to_string(),
                timeout_secs: 30,
            },
            server: ServerConfig {
                name: "Demo 🚀".to_string(),
                instructions: None,
            },
        }
    }

    /// Parsed text fields, rejecting names outside the document model.
    pub fn text_fields(&self) -> Result<Vec<TextField>> {
        TextField::parse_set(&self.search.text_fields)
    }

    fn validate(&self) -> Result<()> {
        if self.archive.extensions.is_empty() {
            return Err(SearchError::Config(
                "archive.extensions must not be empty".to_string(),
            ));
        }

        self.text_fields()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        if self.search.default_results == 0 {
            return Err(SearchError::Config(
                "search.default_results must be greater than 0".to_string(),
            ));
        }

        if self.scraper.timeout_secs == 0 {
            return Err(SearchError::Config(
                "scraper.timeout_secs must be greater than 0".to_string(),
            ));
        }

        crate::utils::Validator::validate_url(&self.scraper.reader_base_url)
            .map_err(|e| SearchError::Config(e.to_string()))?;

        Ok(())
    }
}
