//! pdfpages - Split PDF pages into files and merge them back.
//!
//! This library turns a page range of a PDF into one file per page, either
//! PNG images rendered through Pdfium or single-page PDFs, and merges a
//! folder of such files into one PDF. It provides:
//!
//! - Page extraction with per-format range handling
//! - Folder merging in lexical or numeric order
//! - Pre-flight validation
//! - Dry-run plans and serializable reports
//!
//! # Examples
//!
//! ## Extract and merge back
//!
//! ```no_run
//! use pdfpages::config::{ExtractionRequest, MergeRequest, PageFormat, PageRange};
//! use pdfpages::extract::Extractor;
//! use pdfpages::merge::Merger;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = ExtractionRequest::new("book.pdf", PageFormat::Pdf, PageRange::new(1, 3)?);
//! let report = Extractor::new().extract(&request, Path::new("."))?;
//!
//! let merge = MergeRequest::new(&report.output_dir, "book_merged.pdf", PageFormat::Pdf);
//! let merged = Merger::new().merge(&merge)?;
//! assert_eq!(merged.total_pages, 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using individual components
//!
//! ```no_run
//! use pdfpages::extract::PageSplitter;
//! use pdfpages::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("book.pdf"))?;
//! let mut first = PageSplitter::new().split_page(&loaded.document, 1)?;
//! PdfWriter::new().save(&mut first, Path::new("first.pdf"))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod merge;
pub mod output;
pub mod paths;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, ExtractionRequest, MergeRequest, PageFormat, PageRange, SortOrder};
pub use error::{ErrorKind, PdfPagesError, Result};
pub use extract::{ExtractionReport, Extractor};
pub use merge::{MergeReport, Merger};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
