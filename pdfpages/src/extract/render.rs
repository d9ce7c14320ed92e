//! Page rasterization.
//!
//! Rendering is delegated to Pdfium through [`PdfiumRenderer`]. The
//! [`PageRenderer`] trait is the seam the extractor talks to, so callers (and
//! tests) can substitute another rasterizer.

use crate::config::PageRange;
use crate::error::{PdfPagesError, Result};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

/// Resolution of PDF user space, in points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Fallback location checked after the working directory.
const OPT_LIBRARY_DIR: &str = "/opt/pdfium/lib";

/// A rasterized page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// 1-based page number in the source document.
    pub page_number: u32,
    /// Rendered pixels.
    pub image: DynamicImage,
}

/// Rasterizes pages of a PDF file.
pub trait PageRenderer {
    /// Number of pages in `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be opened.
    fn page_count(&self, source: &Path) -> Result<u32>;

    /// Render every page of `range` at `dpi`, in ascending order, handing
    /// each page to `on_page` as soon as it is decoded.
    ///
    /// Rendering stops at the first error, whether raised by the renderer or
    /// returned by `on_page`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be opened, a page fails to
    /// render or `on_page` fails.
    fn render_pages(
        &self,
        source: &Path,
        range: PageRange,
        dpi: f32,
        on_page: &mut dyn FnMut(RenderedPage) -> Result<()>,
    ) -> Result<()>;
}

/// [`PageRenderer`] backed by the Pdfium shared library.
///
/// The library is bound on every call; Pdfium instances are not shared.
#[derive(Debug, Clone, Default)]
pub struct PdfiumRenderer {
    library_dir: Option<PathBuf>,
}

impl PdfiumRenderer {
    /// Renderer that searches `./`, `/opt/pdfium/lib` and then the system
    /// library path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that tries `dir` before the default locations.
    pub fn with_library_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: Some(dir.into()),
        }
    }

    /// Bind the Pdfium library.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::RendererUnavailable`] if no location yields a
    /// loadable library.
    pub fn bind(&self) -> Result<Pdfium> {
        let mut candidates = Vec::new();
        if let Some(dir) = &self.library_dir {
            candidates.push(dir.clone());
        }
        candidates.push(PathBuf::from("./"));
        candidates.push(PathBuf::from(OPT_LIBRARY_DIR));

        let bundled = candidates.iter().find_map(|dir| {
            let bound =
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)).ok();
            if bound.is_some() {
                log::debug!("bound pdfium from {}", dir.display());
            }
            bound
        });

        let bindings = match bundled {
            Some(bindings) => bindings,
            None => Pdfium::bind_to_system_library().map_err(|e| {
                PdfPagesError::RendererUnavailable {
                    reason: format!("Failed to initialize PDFium: {e}"),
                }
            })?,
        };

        Ok(Pdfium::new(bindings))
    }

    fn open<'a>(&self, pdfium: &'a Pdfium, source: &Path) -> Result<PdfDocument<'a>> {
        pdfium
            .load_pdf_from_file(source, None)
            .map_err(|e| match e {
                PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
                    PdfPagesError::EncryptedPdf {
                        path: source.to_path_buf(),
                    }
                }
                other => PdfPagesError::failed_to_load_pdf(source.to_path_buf(), other.to_string()),
            })
    }
}

impl PageRenderer for PdfiumRenderer {
    fn page_count(&self, source: &Path) -> Result<u32> {
        let pdfium = self.bind()?;
        let document = self.open(&pdfium, source)?;
        Ok(document.pages().len() as u32)
    }

    fn render_pages(
        &self,
        source: &Path,
        range: PageRange,
        dpi: f32,
        on_page: &mut dyn FnMut(RenderedPage) -> Result<()>,
    ) -> Result<()> {
        let pdfium = self.bind()?;
        let document = self.open(&pdfium, source)?;
        let pages = document.pages();
        let config = PdfRenderConfig::new()
            .scale_page_by_factor(dpi / POINTS_PER_INCH)
            .render_form_data(true)
            .render_annotations(true);

        for page_number in range.start()..=range.end() {
            let index = u16::try_from(page_number - 1)
                .map_err(|_| PdfPagesError::render_failed(page_number, "page index out of range"))?;
            let page = pages
                .get(index)
                .map_err(|e| PdfPagesError::render_failed(page_number, e.to_string()))?;
            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| PdfPagesError::render_failed(page_number, e.to_string()))?;

            log::debug!("rendered page {page_number} at {dpi} dpi");
            on_page(RenderedPage {
                page_number,
                image: bitmap.as_image(),
            })?;
        }

        Ok(())
    }
}
