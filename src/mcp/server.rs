// file: src/mcp/server.rs
// description: MCP server exposing documentation search and web scraping tools
// reference: https://docs.rs/rmcp

use crate::config::Config;
use crate::error::{self, SearchError};
use crate::models::render_results;
use crate::scraper::ReaderClient;
use crate::search::{IndexCache, IndexSource};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ScrapeRequest {
    /// Page URL to fetch, including the http(s) scheme
    pub url: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchRequest {
    /// Search query string
    pub query: String,
    /// Number of results to return (default: 5)
    #[serde(default)]
    pub num_results: Option<usize>,
}

#[derive(Clone)]
pub struct DocsSearchMcp {
    config: Arc<Config>,
    index: Arc<IndexCache>,
    reader: Arc<ReaderClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DocsSearchMcp {
    pub fn new(config: Config) -> error::Result<Self> {
        let index = IndexCache::new(IndexSource::from_config(&config)?);
        let reader = ReaderClient::new(&config.scraper)?;

        Ok(Self {
            config: Arc::new(config),
            index: Arc::new(index),
            reader: Arc::new(reader),
            tool_router: Self::tool_router(),
        })
    }

    pub fn get_tool_router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    pub fn index_cache(&self) -> &IndexCache {
        &self.index
    }

    /// Build the documentation index ahead of the first search.
    pub async fn warm(&self) -> error::Result<usize> {
        let index = self.index.get_or_build().await?;
        Ok(index.len())
    }

    /// Search text for `query`; failures come back as an error message.
    pub async fn search_text(&self, query: &str, num_results: Option<usize>) -> String {
        match self.try_search(query, num_results).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Documentation search failed: {}", e);
                format!("Error searching documentation: {}", e)
            }
        }
    }

    async fn try_search(&self, query: &str, num_results: Option<usize>) -> error::Result<String> {
        let limit = num_results.unwrap_or(self.config.search.default_results);
        let index = self.index.get_or_build().await?;
        let results = index.query(query, limit)?;
        Ok(render_results(
            query,
            &results,
            self.config.search.preview_chars,
        ))
    }

    #[tool(description = "Download webpage content as markdown using Jina Reader")]
    async fn scrape_web(
        &self,
        Parameters(ScrapeRequest { url }): Parameters<ScrapeRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!("MCP: Scraping {}", url);

        let text = self.reader.scrape(&url).await.map_err(|e| match e {
            SearchError::Validation(message) => McpError::invalid_params(message, None),
            other => McpError::internal_error(other.to_string(), None),
        })?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Search the documentation index for relevant documents")]
    async fn search_documentation(
        &self,
        Parameters(SearchRequest { query, num_results }): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!("MCP: Searching documentation for: {}", query);

        let text = self.search_text(&query, num_results).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for DocsSearchMcp {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = self.config.server.name.clone();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info.instructions = self.config.server.instructions.clone().or_else(|| {
            Some(format!(
                "Search markdown documentation extracted from {} and scrape web pages as markdown.",
                self.config.archive.path.display()
            ))
        });
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::extractor::tests::write_archive;
    use crate::search::EngineKind;
    use tempfile::TempDir;

    fn config_for(path: std::path::PathBuf) -> Config {
        let mut config = Config::default_config();
        config.archive.path = path;
        config.search.engine = EngineKind::Overlap;
        config
    }

    #[test]
    fn test_registers_both_tools() {
        let mcp = DocsSearchMcp::new(Config::default_config()).unwrap();
        let names: Vec<String> = mcp
            .get_tool_router()
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        assert!(names.contains(&"scrape_web".to_string()));
        assert!(names.contains(&"search_documentation".to_string()));
    }

    #[test]
    fn test_server_identity() {
        let mcp = DocsSearchMcp::new(Config::default_config()).unwrap();
        let info = mcp.get_info();

        assert_eq!(info.server_info.name, "Demo 🚀");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_search_formats_results() {
        let temp = TempDir::new().unwrap();
        let path = write_archive(
            temp.path(),
            &[
                ("demo-main/README.md", b"Demo project\nwith details"),
                ("demo-main/src/util.py", b"demo = True"),
            ],
        );
        let mcp = DocsSearchMcp::new(config_for(path)).unwrap();

        let text = mcp.search_text("demo", None).await;

        assert_eq!(
            text,
            "Search results for 'demo':\n\n1. File: README.md\n   Preview: Demo project with details...\n\n"
        );
    }

    #[tokio::test]
    async fn test_search_errors_become_text() {
        let temp = TempDir::new().unwrap();
        let mcp = DocsSearchMcp::new(config_for(temp.path().join("missing.zip"))).unwrap();

        let text = mcp.search_text("demo", Some(3)).await;

        assert!(text.starts_with("Error searching documentation: Archive not found"));
    }

    #[tokio::test]
    async fn test_warm_builds_cache() {
        let temp = TempDir::new().unwrap();
        let path = write_archive(temp.path(), &[("repo/a.md", b"a"), ("repo/b.mdx", b"b")]);
        let mcp = DocsSearchMcp::new(config_for(path)).unwrap();

        assert_eq!(mcp.warm().await.unwrap(), 2);
        assert!(mcp.index_cache().get().await.is_some());
    }
}
