//! Semantic Scholar API Client
//!
//! Pages through the relevance search endpoint and normalizes each hit into
//! a [`PaperRecord`].
//!
//! API Details:
//! - Search endpoint: GET /graph/v1/paper/search
//! - Max 100 papers per page
//! - Rate limit: shared unauthenticated pool, 429 when exceeded

use crate::error::{Result, ScholarError};
use crate::paper::{Citation, PaperRecord, Published};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Semantic Scholar API base URL
pub const SS_API_BASE: &str = "https://api.semanticscholar.org/graph/v1";

/// Fields requested for every search hit
pub const SEARCH_FIELDS: &str = "title,authors,abstract,year,url,references";

/// Maximum papers per search page
pub const MAX_PAGE_SIZE: usize = 100;

/// Options for a paginated search
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Upper bound on the number of papers returned
    pub max_papers: usize,
    /// Papers requested per page (1..=100)
    pub batch_size: usize,
    /// Pause between successful pages
    pub delay: Duration,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries on HTTP 429 before giving up
    pub max_retries: u32,
    /// Base backoff for 429 retries, doubled on each attempt
    pub retry_backoff: Duration,
    /// API root, e.g. `https://api.semanticscholar.org/graph/v1`
    pub base_url: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_papers: 1000,
            batch_size: 10,
            delay: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_backoff: Duration::from_secs(1),
            base_url: SS_API_BASE.to_string(),
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_papers == 0 {
            return Err(ScholarError::Validation(
                "max_papers must be at least 1".to_string(),
            ));
        }

        if self.batch_size == 0 || self.batch_size > MAX_PAGE_SIZE {
            return Err(ScholarError::Validation(format!(
                "batch_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.batch_size
            )));
        }

        Url::parse(&self.base_url).map_err(|e| {
            ScholarError::Config(format!("Invalid base URL {:?}: {}", self.base_url, e))
        })?;

        Ok(())
    }
}

/// Why pagination ended
#[derive(Debug)]
pub enum StopReason {
    /// Collected `max_papers` records
    MaxPapersReached,
    /// A page came back without data
    NoData,
    /// A page returned fewer entries than requested
    ShortPage,
    /// The offset reached the `total` reported by the API
    Exhausted,
    /// A request failed; results gathered so far are kept
    Failed(ScholarError),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::MaxPapersReached => f.write_str("maximum papers reached"),
            StopReason::NoData => f.write_str("no more data"),
            StopReason::ShortPage => f.write_str("short page"),
            StopReason::Exhausted => f.write_str("all results retrieved"),
            StopReason::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}

/// Result of a paginated search
#[derive(Debug)]
pub struct SearchOutcome {
    /// Records in API order, never more than `max_papers`
    pub papers: Vec<PaperRecord>,
    /// Number of pages that returned a successful response
    pub pages: usize,
    pub stop: StopReason,
}

impl SearchOutcome {
    /// The error that cut pagination short, if any
    pub fn error(&self) -> Option<&ScholarError> {
        match &self.stop {
            StopReason::Failed(e) => Some(e),
            _ => None,
        }
    }
}

// === Semantic Scholar API Response Types ===

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total: Option<u64>,
    data: Option<Vec<SSPaper>>,
}

#[derive(Debug, Deserialize)]
struct SSPaper {
    title: Option<String>,
    authors: Option<Vec<SSAuthor>>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    year: Option<i32>,
    url: Option<String>,
    references: Option<Vec<SSReference>>,
}

#[derive(Debug, Deserialize)]
struct SSAuthor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SSReference {
    title: Option<String>,
    authors: Option<Vec<SSAuthor>>,
    year: Option<i32>,
}

fn author_names(authors: Option<Vec<SSAuthor>>) -> Vec<String> {
    authors
        .unwrap_or_default()
        .into_iter()
        .filter_map(|a| a.name)
        .collect()
}

impl From<SSReference> for Citation {
    fn from(reference: SSReference) -> Self {
        Citation {
            title: reference.title,
            authors: author_names(reference.authors),
            year: reference.year,
        }
    }
}

impl From<SSPaper> for PaperRecord {
    fn from(paper: SSPaper) -> Self {
        let citations: Vec<Citation> = paper
            .references
            .unwrap_or_default()
            .into_iter()
            .map(Citation::from)
            .collect();

        PaperRecord::new(
            paper.title,
            paper.abstract_text,
            author_names(paper.authors),
            Published::from(paper.year),
            paper.url,
            &citations,
        )
    }
}

/// Semantic Scholar search client with pagination and 429 backoff
pub struct SemanticScholarClient {
    client: Client,
    search_url: String,
    options: SearchOptions,
}

impl SemanticScholarClient {
    /// Create a new client after validating `options`
    pub fn new(options: SearchOptions) -> Result<Self> {
        options.validate()?;

        let client = Client::builder()
            .user_agent(concat!("rusts2scholar/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout)
            .build()
            .map_err(|e| ScholarError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let search_url = format!("{}/paper/search", options.base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            search_url,
            options,
        })
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Run a paginated search for `query`.
    ///
    /// Never fails: transport, status and parse errors end pagination and
    /// are reported through [`SearchOutcome::stop`] alongside the papers
    /// collected before the failure.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let max_papers = self.options.max_papers;
        let batch_size = self.options.batch_size;

        info!(
            query = query,
            max_papers = max_papers,
            batch_size = batch_size,
            "Starting Semantic Scholar search"
        );

        let mut papers: Vec<PaperRecord> = Vec::new();
        let mut offset = 0usize;
        let mut pages = 0usize;

        let stop = loop {
            if pages > 0 && !self.options.delay.is_zero() {
                tokio::time::sleep(self.options.delay).await;
            }

            let limit = batch_size.min(max_papers - papers.len());
            info!(offset = offset, limit = limit, "Querying Semantic Scholar");

            let page = match self.fetch_page(query, offset, limit).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        offset = offset,
                        error = %e,
                        "Page request failed, keeping partial results"
                    );
                    break StopReason::Failed(e);
                }
            };
            pages += 1;

            let entries = match page.data {
                Some(entries) if !entries.is_empty() => entries,
                _ => {
                    info!(offset = offset, "No papers found in this page");
                    break StopReason::NoData;
                }
            };

            let returned = entries.len();
            info!(offset = offset, found = returned, "Fetched page");

            let room = max_papers - papers.len();
            papers.extend(entries.into_iter().take(room).map(PaperRecord::from));
            offset += returned;

            if papers.len() >= max_papers {
                info!(max_papers = max_papers, "Reached the maximum number of papers");
                break StopReason::MaxPapersReached;
            }

            if returned < limit {
                break StopReason::ShortPage;
            }

            if let Some(total) = page.total {
                if offset as u64 >= total {
                    break StopReason::Exhausted;
                }
            }
        };

        info!(
            total = papers.len(),
            pages = pages,
            stop = %stop,
            "Semantic Scholar search complete"
        );

        SearchOutcome {
            papers,
            pages,
            stop,
        }
    }

    /// Fetch a single search page, retrying on 429
    async fn fetch_page(&self, query: &str, offset: usize, limit: usize) -> Result<SearchResponse> {
        let offset_param = offset.to_string();
        let limit_param = limit.to_string();
        let mut retries = 0;

        loop {
            let response = self
                .client
                .get(&self.search_url)
                .query(&[
                    ("query", query),
                    ("offset", offset_param.as_str()),
                    ("limit", limit_param.as_str()),
                    ("fields", SEARCH_FIELDS),
                ])
                .send()
                .await?;

            let status = response.status();
            debug!(url = %response.url(), status = status.as_u16(), "Search response");

            if status == StatusCode::TOO_MANY_REQUESTS {
                if retries < self.options.max_retries {
                    let backoff = self
                        .options
                        .retry_backoff
                        .saturating_mul(2u32.saturating_pow(retries));
                    warn!(
                        retries = retries,
                        backoff_ms = backoff.as_millis() as u64,
                        "Rate limited, backing off"
                    );
                    tokio::time::sleep(backoff).await;
                    retries += 1;
                    continue;
                }
                return Err(ScholarError::RateLimited(retries));
            }

            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), error = %error_text, "API error");
                return Err(ScholarError::Api {
                    code: status.as_u16() as i32,
                    message: format!("Semantic Scholar API error: {} - {}", status, error_text),
                });
            }

            let body = response.text().await?;
            let page: SearchResponse = serde_json::from_str(&body).map_err(|e| {
                debug!(body = %body, "Unparseable response body");
                ScholarError::Parse(format!("Failed to parse Semantic Scholar response: {}", e))
            })?;

            if page.data.as_ref().map_or(true, Vec::is_empty) {
                debug!(body = %body, "Full response for empty page");
            }

            return Ok(page);
        }
    }
}

/// Search Semantic Scholar for `query`.
///
/// # Arguments
///
/// * `query` - Free-text search (keywords, author names, ...)
/// * `options` - Limits, pacing and endpoint
///
/// # Returns
///
/// The outcome of pagination, or an error when `options` are invalid.
pub async fn search(query: &str, options: SearchOptions) -> Result<SearchOutcome> {
    let client = SemanticScholarClient::new(options)?;
    Ok(client.search(query).await)
}
