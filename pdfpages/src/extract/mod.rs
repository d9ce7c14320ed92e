//! Page extraction.
//!
//! Splits a PDF into one file per page, either rasterized to PNG through a
//! [`PageRenderer`] or cut into single-page PDFs with [`PageSplitter`].
//! Files land in `<output_root>/<source stem>/page_<n>.<ext>`.
//!
//! The two formats treat the range differently. Image extraction refuses a
//! range that runs past the last page and writes nothing; PDF extraction
//! clamps the end of the range to the page count.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::config::{ExtractionRequest, PageFormat, PageRange};
//! use pdfpages::extract::Extractor;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = ExtractionRequest::new("book.pdf", PageFormat::Pdf, PageRange::new(1, 3)?);
//! let report = Extractor::new().extract(&request, Path::new("."))?;
//! println!("{} page(s) in {}", report.pages.len(), report.output_dir.display());
//! # Ok(())
//! # }
//! ```

pub mod render;
pub mod split;

pub use render::{PageRenderer, PdfiumRenderer, RenderedPage};
pub use split::PageSplitter;

use crate::config::{ExtractionRequest, PageFormat};
use crate::error::{PdfPagesError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::paths;
use crate::validation::Validator;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A file written (or planned) for one source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFile {
    /// 1-based page number in the source document.
    pub page_number: u32,
    /// Location of the file.
    pub path: PathBuf,
}

/// Outcome of an extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    /// Source document.
    pub source: PathBuf,
    /// Directory holding the page files.
    pub output_dir: PathBuf,
    /// Format of the page files.
    pub format: PageFormat,
    /// Files written, in page order.
    pub pages: Vec<PageFile>,
}

/// What an extraction would write.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionPlan {
    /// Source document.
    pub source: PathBuf,
    /// Directory that would hold the page files.
    pub output_dir: PathBuf,
    /// Format of the page files.
    pub format: PageFormat,
    /// Pages in the source document.
    pub total_pages: u32,
    /// Files that would be written, in page order.
    pub pages: Vec<PageFile>,
}

/// Extracts page ranges from PDF files.
#[derive(Debug, Clone)]
pub struct Extractor<R = PdfiumRenderer> {
    renderer: R,
    reader: PdfReader,
    writer: PdfWriter,
    splitter: PageSplitter,
    validator: Validator,
}

impl Extractor<PdfiumRenderer> {
    /// Create an extractor rendering through Pdfium found in the default
    /// locations.
    pub fn new() -> Self {
        Self::with_renderer(PdfiumRenderer::new())
    }
}

impl Default for Extractor<PdfiumRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PageRenderer> Extractor<R> {
    /// Create an extractor using `renderer` for image output.
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            reader: PdfReader::new(),
            writer: PdfWriter::new(),
            splitter: PageSplitter::new(),
            validator: Validator::new(),
        }
    }

    /// Extract the requested pages below `output_root`.
    ///
    /// The output directory is created if missing and reused if present;
    /// existing page files are overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source does not exist or cannot be decoded
    /// - The range exceeds the document (image format only)
    /// - The output directory or a page file cannot be written
    ///
    /// Files written before a failure stay on disk.
    pub fn extract(&self, request: &ExtractionRequest, output_root: &Path) -> Result<ExtractionReport> {
        self.validator.validate_source(&request.source)?;
        let output_dir = paths::extraction_dir(output_root, &request.source);

        log::info!(
            "extracting pages {} of {} as {}",
            request.range,
            request.source.display(),
            request.format
        );

        let pages = match request.format {
            PageFormat::Image => self.extract_images(request, &output_dir)?,
            PageFormat::Pdf => self.extract_pdfs(request, &output_dir)?,
        };

        log::info!("wrote {} page file(s) to {}", pages.len(), output_dir.display());

        Ok(ExtractionReport {
            source: request.source.clone(),
            output_dir,
            format: request.format,
            pages,
        })
    }

    /// Compute the files [`Extractor::extract`] would write, without writing.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`Extractor::extract`].
    pub fn plan(&self, request: &ExtractionRequest, output_root: &Path) -> Result<ExtractionPlan> {
        self.validator.validate_source(&request.source)?;
        let output_dir = paths::extraction_dir(output_root, &request.source);

        let (total_pages, page_numbers) = match request.format {
            PageFormat::Image => {
                let total = self.renderer.page_count(&request.source)?;
                self.check_fits(request, total)?;
                (total, request.range.clamped_pages(total))
            }
            PageFormat::Pdf => {
                let total = self.reader.load(&request.source)?.page_count;
                (total, request.range.clamped_pages(total))
            }
        };

        let pages = page_numbers
            .into_iter()
            .map(|page_number| page_file(&output_dir, page_number, request.format))
            .collect();

        Ok(ExtractionPlan {
            source: request.source.clone(),
            output_dir,
            format: request.format,
            total_pages,
            pages,
        })
    }

    fn extract_images(&self, request: &ExtractionRequest, output_dir: &Path) -> Result<Vec<PageFile>> {
        let total = self.renderer.page_count(&request.source)?;
        self.check_fits(request, total)?;
        paths::ensure_dir(output_dir)?;

        let mut written = Vec::with_capacity(request.range.len());
        self.renderer.render_pages(
            &request.source,
            request.range,
            request.dpi,
            &mut |rendered| {
                let file = page_file(output_dir, rendered.page_number, PageFormat::Image);
                self.writer.save_png(&rendered.image, &file.path)?;
                log::debug!("wrote {}", file.path.display());
                written.push(file);
                Ok(())
            },
        )?;

        Ok(written)
    }

    fn extract_pdfs(&self, request: &ExtractionRequest, output_dir: &Path) -> Result<Vec<PageFile>> {
        let loaded = self.reader.load(&request.source)?;
        paths::ensure_dir(output_dir)?;

        let page_numbers = request.range.clamped_pages(loaded.page_count);
        if page_numbers.len() < request.range.len() {
            log::warn!(
                "{} has {} page(s); range {} clamped",
                request.source.display(),
                loaded.page_count,
                request.range
            );
        }

        let mut written = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            let mut single = self.splitter.split_page(&loaded.document, page_number)?;
            let file = page_file(output_dir, page_number, PageFormat::Pdf);
            self.writer.save(&mut single, &file.path)?;
            log::debug!("wrote {}", file.path.display());
            written.push(file);
        }

        Ok(written)
    }

    fn check_fits(&self, request: &ExtractionRequest, total_pages: u32) -> Result<()> {
        if request.range.fits(total_pages) {
            return Ok(());
        }
        Err(PdfPagesError::PageOutOfRange {
            path: request.source.clone(),
            start: request.range.start(),
            end: request.range.end(),
            total_pages,
        })
    }
}

fn page_file(output_dir: &Path, page_number: u32, format: PageFormat) -> PageFile {
    PageFile {
        page_number,
        path: output_dir.join(paths::page_file_name(page_number, format)),
    }
}

/// Extract pages with a default [`Extractor`].
///
/// # Errors
///
/// See [`Extractor::extract`].
pub fn extract_pages(request: &ExtractionRequest, output_root: &Path) -> Result<ExtractionReport> {
    Extractor::new().extract(request, output_root)
}
