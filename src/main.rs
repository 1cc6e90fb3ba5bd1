// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use mdsearch::utils::logging::{failure_line, index_ready_line, no_results_line, result_heading};
use mdsearch::{ArchiveExtractor, Config, DocsSearchMcp, ReaderClient, SearchIndex, Validator};
use rmcp::ServiceExt;
use std::path::PathBuf;
use tracing::{error, info, warn};

const CLI_PREVIEW_CHARS: usize = 200;

#[derive(Parser)]
#[command(name = "mdsearch")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Markdown documentation search over zipped repositories", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and index an archive, listing every indexed document
    Index {
        #[arg(long, value_name = "ZIP")]
        archive: Option<PathBuf>,
    },

    /// Search the documentation index once and print the ranked results
    Search {
        /// Search query text
        query: String,

        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(long, value_name = "ZIP")]
        archive: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a web page as markdown through the reader proxy
    Scrape { url: String },

    /// Start MCP (Model Context Protocol) server for agentic tool integration
    Serve {
        #[arg(long, default_value = "stdio")]
        transport: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    mdsearch::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Index { archive } => {
            cmd_index(&config, archive).await?;
        }
        Commands::Search {
            query,
            limit,
            archive,
            json,
        } => {
            cmd_search(&config, &query, limit, archive, json).await?;
        }
        Commands::Scrape { url } => {
            cmd_scrape(&config, &url).await?;
        }
        Commands::Serve { transport } => {
            cmd_serve(&config, &transport).await?;
        }
    }

    Ok(())
}

async fn build_index(config: &Config, archive: Option<PathBuf>) -> Result<(SearchIndex, mdsearch::ExtractionStats)> {
    let archive_path = archive.unwrap_or_else(|| config.archive.path.clone());
    Validator::validate_archive_path(&archive_path)?;

    let extractor = ArchiveExtractor::new(config.archive.clone());
    let fields = config.text_fields()?;
    let engine_kind = config.search.engine;

    tokio::task::spawn_blocking(move || {
        let engine = engine_kind.engine();
        SearchIndex::from_archive(&extractor, &archive_path, fields, engine.as_ref())
    })
    .await
    .context("Index build task panicked")?
    .context("Failed to build documentation index")
}

async fn cmd_index(config: &Config, archive: Option<PathBuf>) -> Result<()> {
    info!("Extracting and indexing documents");

    let (index, stats) = build_index(config, archive).await?;

    for document in index.documents() {
        println!("Indexed: {}", document.filename);
    }

    println!("\nTotal documents indexed: {}", index.len());
    println!(
        "Entries seen: {} | skipped: {} | lossy decoded: {}",
        stats.entries_seen, stats.entries_skipped, stats.lossy_entries
    );
    println!("{}", index_ready_line(index.engine_name(), index.built_at()));

    Ok(())
}

async fn cmd_search(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    archive: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    Validator::validate_query(query)?;
    let limit = limit.unwrap_or(config.search.default_results);

    let (index, _stats) = build_index(config, archive).await?;

    info!("Searching for: {}", query);
    let results = index.query(query, limit).context("Search failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("\n{}", no_results_line(query));
        return Ok(());
    }

    println!("\nTop {} results for '{}':", results.len(), query);
    println!("{}", "=".repeat(60));

    for result in &results {
        println!("\n{}", result_heading(result.rank, &result.filename));
        println!("   Preview: {}...", result.preview(CLI_PREVIEW_CHARS));
    }

    println!("\n{}", "=".repeat(60));
    println!("FIRST RESULT: {}", results[0].filename);
    println!("{}", "=".repeat(60));

    Ok(())
}

async fn cmd_scrape(config: &Config, url: &str) -> Result<()> {
    let reader = ReaderClient::new(&config.scraper)?;

    match reader.scrape(url).await {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", failure_line(&e));
            Err(e.into())
        }
    }
}

async fn cmd_serve(config: &Config, transport: &str) -> Result<()> {
    info!("Starting MCP server (transport: {})", transport);

    if transport != "stdio" {
        error!("Only stdio transport is currently supported");
        return Err(anyhow::anyhow!("Unsupported transport: {}", transport));
    }

    let mcp_server = DocsSearchMcp::new(config.clone()).context("Failed to create MCP server")?;

    if config.search.warm_on_start {
        match mcp_server.warm().await {
            Ok(count) => info!("Documentation index initialized successfully ({} documents)", count),
            Err(e) => warn!("Could not initialize documentation index: {}", e),
        }
    }

    info!("MCP server ready. Available tools:");
    for tool in mcp_server.get_tool_router().list_all() {
        info!(
            "  - {}: {}",
            tool.name,
            tool.description.as_deref().unwrap_or("No description")
        );
    }

    let service = mcp_server
        .serve(rmcp::transport::stdio())
        .await
        .inspect_err(|e| error!("MCP serving error: {:?}", e))?;
    service.waiting().await?;

    Ok(())
}
