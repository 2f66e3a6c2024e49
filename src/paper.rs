//! Paper record model and reference formatting.
//!
//! Every field of a [`PaperRecord`] has a placeholder, so a record built
//! from a sparse API entry never carries an empty slot into the CSV.

use std::fmt;

/// Placeholder for a missing title
pub const NO_TITLE: &str = "No title";
/// Placeholder for a missing abstract
pub const NO_ABSTRACT: &str = "No abstract available";
/// Placeholder for a missing URL
pub const NO_URL: &str = "No URL available";
/// Placeholder for an empty reference list
pub const NO_REFERENCES: &str = "No references available";
/// Placeholder for a missing publication year
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Publication year, or `Unknown` when the API omits it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Published {
    Year(i32),
    #[default]
    Unknown,
}

impl From<Option<i32>> for Published {
    fn from(year: Option<i32>) -> Self {
        year.map(Published::Year).unwrap_or(Published::Unknown)
    }
}

impl fmt::Display for Published {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Published::Year(year) => write!(f, "{}", year),
            Published::Unknown => f.write_str(UNKNOWN_YEAR),
        }
    }
}

/// One entry of a paper's reference list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Citation {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub year: Option<i32>,
}

impl Citation {
    /// Format as `[index] A, B, "Title," 2020.`
    pub fn format(&self, index: usize) -> String {
        format!(
            "[{}] {}, \"{},\" {}.",
            index,
            self.authors.join(", "),
            self.title.as_deref().unwrap_or(NO_TITLE),
            Published::from(self.year)
        )
    }
}

/// Join all citations into a single IEEE-like string, indexed from 1.
///
/// Returns [`NO_REFERENCES`] for an empty list.
pub fn format_references(citations: &[Citation]) -> String {
    if citations.is_empty() {
        return NO_REFERENCES.to_string();
    }

    citations
        .iter()
        .enumerate()
        .map(|(idx, citation)| citation.format(idx + 1))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A normalized paper retrieved from the search API.
///
/// Built once per search hit and read-only afterwards; `references` is
/// derived from the citation list at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
    title: String,
    summary: String,
    authors: Vec<String>,
    published: Published,
    pdf_url: String,
    references: String,
}

impl PaperRecord {
    pub fn new(
        title: Option<String>,
        summary: Option<String>,
        authors: Vec<String>,
        published: Published,
        pdf_url: Option<String>,
        citations: &[Citation],
    ) -> Self {
        Self {
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            summary: summary.unwrap_or_else(|| NO_ABSTRACT.to_string()),
            authors,
            published,
            pdf_url: pdf_url.unwrap_or_else(|| NO_URL.to_string()),
            references: format_references(citations),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Abstract text
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Authors joined with `", "`, the way they appear in the CSV
    pub fn authors_joined(&self) -> String {
        self.authors.join(", ")
    }

    pub fn published(&self) -> Published {
        self.published
    }

    pub fn pdf_url(&self) -> &str {
        &self.pdf_url
    }

    pub fn references(&self) -> &str {
        &self.references
    }
}
