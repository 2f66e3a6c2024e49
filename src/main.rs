//! rusts2scholar - Semantic Scholar search to CSV
//!
//! Pages through the Semantic Scholar search API for a query and saves the
//! normalized results to a CSV file.
//!
//! ## Usage
//!
//! ```bash
//! rusts2scholar "machine learning" --max-papers 200 --batch-size 50 -o output_papers
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rusts2scholar::{
    export,
    semanticscholar::{self, SearchOptions, SS_API_BASE},
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Search Semantic Scholar and save the results to CSV
#[derive(Parser)]
#[command(name = "rusts2scholar")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Search query (keywords, author names, etc.)
    #[arg(default_value = "machine learning")]
    query: String,

    /// Maximum number of papers to fetch
    #[arg(long, default_value_t = 1000)]
    max_papers: usize,

    /// Papers per request (maximum 100)
    #[arg(long, default_value_t = 10)]
    batch_size: usize,

    /// Output folder (created if missing)
    #[arg(short, long, default_value = "output_papers")]
    output: PathBuf,

    /// Output file name
    #[arg(long, default_value = export::DEFAULT_FILENAME)]
    filename: String,

    /// Seconds to wait between pages
    #[arg(long, default_value_t = 2)]
    delay_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Retries when rate limited (HTTP 429)
    #[arg(long, default_value_t = 3)]
    max_retries: u32,

    /// Semantic Scholar Graph API root
    #[arg(long, default_value = SS_API_BASE)]
    base_url: String,

    /// Don't print each retrieved paper
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    let options = SearchOptions {
        max_papers: cli.max_papers,
        batch_size: cli.batch_size,
        delay: Duration::from_secs(cli.delay_secs),
        timeout: Duration::from_secs(cli.timeout_secs),
        max_retries: cli.max_retries,
        base_url: cli.base_url.clone(),
        ..Default::default()
    };

    println!("Starting paper retrieval...");

    let outcome = semanticscholar::search(&cli.query, options)
        .await
        .context("Invalid search options")?;

    println!("Total papers retrieved: {}", outcome.papers.len());
    if let Some(e) = outcome.error() {
        warn!(error = %e, "Search stopped early");
        println!("Search stopped early: {}", e);
    }

    if outcome.papers.is_empty() {
        println!("No papers retrieved.");
    } else if !cli.quiet {
        for paper in &outcome.papers {
            println!(
                "Title: {}, Authors: {}, Published: {}, PDF URL: {}, References: {}",
                paper.title(),
                paper.authors_joined(),
                paper.published(),
                paper.pdf_url(),
                paper.references()
            );
        }
    }

    // ===========================================
    // Export
    // ===========================================
    match export::save_papers_to_file(&outcome.papers, &cli.output, &cli.filename) {
        Some(path) => println!("Saved {} papers to {}", outcome.papers.len(), path.display()),
        None => println!("Failed to save papers to file (see log for details)"),
    }

    Ok(())
}
