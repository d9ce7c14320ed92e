//! I/O operations for pdfpages.
//!
//! This module handles file I/O for both pipelines:
//! - Loading PDF documents from disk
//! - Writing single-page and merged PDFs
//! - Encoding rendered pages as PNG
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let mut loaded = reader.load(Path::new("input.pdf"))?;
//!
//! let writer = PdfWriter::new();
//! writer.save(&mut loaded.document, Path::new("output.pdf"))?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use crate::error::Result;
use lopdf::Document;
use std::path::Path;

/// Load a PDF document from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid PDF.
pub fn load_pdf(path: &Path) -> Result<Document> {
    let loaded = PdfReader::new().load(path)?;
    Ok(loaded.document)
}

/// Save a PDF document to a file with default write options.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_pdf(doc: &mut Document, path: &Path) -> Result<()> {
    PdfWriter::new().save(doc, path)
}

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
