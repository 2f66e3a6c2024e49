//! # rusts2scholar
//!
//! Semantic Scholar paper search with CSV export
//!
//! ## Modules
//!
//! - [`semanticscholar`] - Paginated Semantic Scholar search client
//! - [`paper`] - Normalized paper records and reference formatting
//! - [`export`] - CSV export
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rusts2scholar::{export, semanticscholar};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let outcome = semanticscholar::search("machine learning", Default::default()).await?;
//!     println!("Found {} papers ({})", outcome.papers.len(), outcome.stop);
//!     let folder = Path::new("output_papers");
//!     export::save_papers_to_file(&outcome.papers, folder, export::DEFAULT_FILENAME);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod export;
pub mod paper;
pub mod semanticscholar;

pub use error::{Result, ScholarError};
pub use paper::{Citation, PaperRecord, Published};
