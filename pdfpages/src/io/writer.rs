//! PDF and image writing.
//!
//! PDFs are written through a buffered writer, optionally to a `*.tmp`
//! sibling that is renamed into place once complete. Rendered pages are
//! encoded as PNG.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # fn example(mut doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save_with_stats(&mut doc, Path::new("output.pdf"))?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use image::{DynamicImage, ImageFormat};
use lopdf::Document;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfPagesError, Result};
use crate::io::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write to a temp file, then rename.
    pub atomic: bool,

    /// Compress content streams before writing.
    pub compress: bool,

    /// Renumber objects densely before writing.
    pub optimize: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            optimize: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,

    /// Whether optimization was applied.
    pub optimized: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writer for PDF documents and page images.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer that writes directly to the target path.
    pub fn non_atomic() -> Self {
        Self {
            options: WriteOptions {
                atomic: false,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file.
    ///
    /// The document is modified in place when compression or optimization
    /// is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be created, written or renamed.
    pub fn save(&self, doc: &mut Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// # Errors
    ///
    /// Same as [`PdfWriter::save`].
    pub fn save_with_stats(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if self.options.compress {
            doc.compress();
        }
        if self.options.optimize {
            doc.renumber_objects();
        }

        let write_path = self.write_path(path);
        self.commit(&write_path, path, self.write_document(doc, &write_path))?;

        let stats = WriteStatistics {
            write_time: start.elapsed(),
            file_size: std::fs::metadata(path).map(|m| m.len()).unwrap_or(0),
            output_path: path.to_path_buf(),
            compressed: self.options.compress,
            optimized: self.options.optimize,
        };
        log::debug!("wrote {} ({})", path.display(), stats.format_file_size());
        Ok(stats)
    }

    /// Encode an image as PNG at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::FailedToCreateOutput`] if the file cannot be
    /// created and [`PdfPagesError::FailedToEncodeImage`] if encoding fails.
    pub fn save_png(&self, image: &DynamicImage, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();
        let write_path = self.write_path(path);
        self.commit(&write_path, path, self.encode_png(image, &write_path, path))?;

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size: std::fs::metadata(path).map(|m| m.len()).unwrap_or(0),
            output_path: path.to_path_buf(),
            compressed: true,
            optimized: false,
        })
    }

    fn write_document(&self, doc: &mut Document, write_path: &Path) -> Result<()> {
        let mut writer = self.create(write_path)?;
        doc.save_to(&mut writer)
            .map_err(|e| PdfPagesError::FailedToWrite {
                path: write_path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;
        writer.flush().map_err(|source| PdfPagesError::FailedToWrite {
            path: write_path.to_path_buf(),
            source,
        })
    }

    fn encode_png(&self, image: &DynamicImage, write_path: &Path, path: &Path) -> Result<()> {
        let mut writer = self.create(write_path)?;
        image
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| PdfPagesError::FailedToEncodeImage {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        writer.flush().map_err(|source| PdfPagesError::FailedToWrite {
            path: write_path.to_path_buf(),
            source,
        })
    }

    fn create(&self, write_path: &Path) -> Result<BufWriter<File>> {
        let file = File::create(write_path).map_err(|source| {
            PdfPagesError::FailedToCreateOutput {
                path: write_path.to_path_buf(),
                source,
            }
        })?;
        Ok(BufWriter::with_capacity(self.options.buffer_size, file))
    }

    /// Move the finished temp file into place. On any failure the temp file
    /// is removed; the target is left as it was.
    fn commit(&self, write_path: &Path, path: &Path, written: Result<()>) -> Result<()> {
        let result = written.and_then(|()| self.finish(write_path, path));
        if result.is_err()
            && self.options.atomic
            && write_path.exists()
            && let Err(err) = std::fs::remove_file(write_path)
        {
            log::warn!("could not remove {}: {err}", write_path.display());
        }
        result
    }

    fn write_path(&self, path: &Path) -> PathBuf {
        if self.options.atomic {
            path.with_extension("tmp")
        } else {
            path.to_path_buf()
        }
    }

    fn finish(&self, write_path: &Path, path: &Path) -> Result<()> {
        if self.options.atomic {
            std::fs::rename(write_path, path).map_err(|source| PdfPagesError::FailedToWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}
