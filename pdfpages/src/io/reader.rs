//! PDF reading and loading operations.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("document.pdf"))?;
//! println!("{} pages in {:?}", loaded.page_count, loaded.load_time);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfPagesError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: u32,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    /// Wrap an already parsed document, reading the file size from `path`
    /// when it exists.
    pub fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len() as u32;
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// PDF reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let doc = Document::load(&path_buf).map_err(|e| {
            let err_msg = e.to_string();
            let lower = err_msg.to_lowercase();
            if lower.contains("encrypt") || lower.contains("password") {
                PdfPagesError::EncryptedPdf {
                    path: path_buf.clone(),
                }
            } else {
                PdfPagesError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        if doc.is_encrypted() {
            return Err(PdfPagesError::EncryptedPdf { path: path_buf });
        }

        let loaded = LoadedPdf::new(doc, path_buf, start.elapsed());
        log::debug!(
            "loaded {} ({} pages, {} bytes)",
            loaded.path.display(),
            loaded.page_count,
            loaded.file_size
        );
        Ok(loaded)
    }

    /// Load several documents in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first file that fails to load.
    pub fn load_all(&self, paths: &[PathBuf]) -> Result<Vec<LoadedPdf>> {
        paths.iter().map(|path| self.load(path)).collect()
    }
}
