//! CSV export of retrieved papers.
//!
//! The header is fixed and always written, even for an empty result set.

use crate::error::Result;
use crate::paper::PaperRecord;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Default output file name
pub const DEFAULT_FILENAME: &str = "semantic_scholar_papers.csv";

/// CSV column order
pub const CSV_HEADERS: &[&str] = &[
    "Title",
    "Authors",
    "Published",
    "Summary",
    "PDF URL",
    "References",
];

/// One CSV row; field order must match [`CSV_HEADERS`]
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    authors: String,
    published: String,
    summary: &'a str,
    pdf_url: &'a str,
    references: &'a str,
}

impl<'a> From<&'a PaperRecord> for CsvRow<'a> {
    fn from(paper: &'a PaperRecord) -> Self {
        Self {
            title: paper.title(),
            authors: paper.authors_joined(),
            published: paper.published().to_string(),
            summary: paper.summary(),
            pdf_url: paper.pdf_url(),
            references: paper.references(),
        }
    }
}

/// Write `papers` to `folder/filename`, creating `folder` if needed.
///
/// Returns the path of the written file. A failure midway may leave a
/// partial file behind.
pub fn write_papers(papers: &[PaperRecord], folder: &Path, filename: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(folder)?;
    let path = folder.join(filename);

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)?;

    wtr.write_record(CSV_HEADERS)?;
    for paper in papers {
        wtr.serialize(CsvRow::from(paper))?;
    }
    wtr.flush()?;

    Ok(path)
}

/// Save papers to CSV, logging instead of propagating failures.
///
/// Returns `None` when the file could not be written.
pub fn save_papers_to_file(
    papers: &[PaperRecord],
    folder: &Path,
    filename: &str,
) -> Option<PathBuf> {
    match write_papers(papers, folder, filename) {
        Ok(path) => {
            info!(count = papers.len(), path = %path.display(), "Saved papers");
            Some(path)
        }
        Err(e) => {
            error!(
                folder = %folder.display(),
                filename = filename,
                error = %e,
                "Failed to save papers to file"
            );
            None
        }
    }
}
