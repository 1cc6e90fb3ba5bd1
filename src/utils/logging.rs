// file: src/utils/logging.rs
// description: Tracing subscriber initialization with optional ANSI coloring

use chrono::{DateTime, Utc};
use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logs go to stderr; stdout belongs to command output and the MCP stdio transport.
pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Closing line of `mdsearch index`.
pub fn index_ready_line(engine: &str, built_at: DateTime<Utc>) -> String {
    format!(
        "{} Index ready ({} engine, built {})",
        "✓".green().bold(),
        engine.cyan(),
        built_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

pub fn no_results_line(query: &str) -> String {
    format!("{} No results found for query: \"{}\"", "⚠".yellow().bold(), query)
}

/// Heading for one ranked hit in `mdsearch search`.
pub fn result_heading(rank: usize, filename: &str) -> String {
    format!("{} Filename: {}", format!("{}.", rank).cyan().bold(), filename.bold())
}

pub fn failure_line(err: &dyn std::fmt::Display) -> String {
    format!("{} {}", "✗".red().bold(), err.to_string().red())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_carry_their_subject() {
        assert!(no_results_line("zebra").contains("\"zebra\""));
        assert!(result_heading(2, "docs/setup.mdx").contains("docs/setup.mdx"));
        assert!(failure_line(&"upstream 502").contains("upstream 502"));

        let built = DateTime::parse_from_rfc3339("2024-05-01T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(index_ready_line("tantivy", built).contains("2024-05-01 08:30:00 UTC"));
    }
}
