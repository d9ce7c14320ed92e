//! Shared fixtures for the integration tests.
//!
//! Fixtures are generated on the fly with lopdf and image, so the tests need
//! no files on disk and no Pdfium library.

#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use lopdf::{Document, Object, Stream, dictionary};
use pdfpages::config::PageRange;
use pdfpages::error::Result;
use pdfpages::extract::{PageRenderer, RenderedPage};
use std::path::Path;

/// Width of page `n` in generated PDFs.
pub fn page_width(n: u32) -> f32 {
    500.0 + n as f32
}

/// Write a PDF with `pages` pages to `path`. Page `n` is
/// [`page_width`]`(n)` points wide and shows its number.
pub fn write_pdf(path: &Path, pages: u32) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            let content = format!("BT /F1 18 Tf 50 700 Td (Page {n}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), (500 + n as i64).into(), 700.into()],
                "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
                "Contents" => content_id,
            });
            page_id.into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

/// Write a solid PNG of `width` x `height` pixels.
pub fn write_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([200, 40, 40]))
        .save(path)
        .unwrap();
}

/// Number of pages in the PDF at `path`.
pub fn page_count(path: &Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

/// Width of every page of the PDF at `path`, in page order.
pub fn page_widths(path: &Path) -> Vec<f32> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|id| media_box(&doc, *id)[2])
        .collect()
}

/// MediaBox of a page, looked up through its ancestors.
pub fn media_box(doc: &Document, page_id: lopdf::ObjectId) -> Vec<f32> {
    let mut current = doc.get_dictionary(page_id).unwrap();
    loop {
        if let Ok(Object::Array(values)) = current.get(b"MediaBox") {
            return values.iter().map(|v| v.as_float().unwrap()).collect();
        }
        let parent = current.get(b"Parent").unwrap().as_reference().unwrap();
        current = doc.get_dictionary(parent).unwrap();
    }
}

/// File names in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Renderer that reads the page count with lopdf and paints each page as a
/// solid square of `dpi / 8` pixels.
#[derive(Debug, Default)]
pub struct SolidRenderer;

impl SolidRenderer {
    pub fn side(dpi: f32) -> u32 {
        (dpi / 8.0).round().max(1.0) as u32
    }
}

impl PageRenderer for SolidRenderer {
    fn page_count(&self, source: &Path) -> Result<u32> {
        Ok(Document::load(source)?.get_pages().len() as u32)
    }

    fn render_pages(
        &self,
        _source: &Path,
        range: PageRange,
        dpi: f32,
        on_page: &mut dyn FnMut(RenderedPage) -> Result<()>,
    ) -> Result<()> {
        let side = Self::side(dpi);
        for page_number in range.start()..=range.end() {
            on_page(RenderedPage {
                page_number,
                image: DynamicImage::ImageRgb8(RgbImage::from_pixel(side, side, Rgb([0, 0, 0]))),
            })?;
        }
        Ok(())
    }
}
