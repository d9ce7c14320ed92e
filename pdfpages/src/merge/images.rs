//! Image to PDF assembly.
//!
//! Every image becomes one page holding a single RGB image XObject drawn
//! over the whole page. Page size follows from the pixel size at a fixed
//! resolution of [`MERGE_RESOLUTION_DPI`].

use crate::error::{PdfPagesError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Resolution at which merged images are laid out.
pub const MERGE_RESOLUTION_DPI: f32 = 100.0;

const XOBJECT_NAME: &[u8] = b"Im0";

/// Builds a multi-page PDF out of image files.
#[derive(Debug, Clone)]
pub struct ImageDocumentBuilder {
    resolution: f32,
}

impl ImageDocumentBuilder {
    /// Builder laying images out at [`MERGE_RESOLUTION_DPI`].
    pub fn new() -> Self {
        Self {
            resolution: MERGE_RESOLUTION_DPI,
        }
    }

    /// Page size in points for an image of `width` x `height` pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfpages::merge::ImageDocumentBuilder;
    ///
    /// let (w, h) = ImageDocumentBuilder::new().page_size(1000, 500);
    /// assert!((w - 720.0).abs() < 1e-3);
    /// assert!((h - 360.0).abs() < 1e-3);
    /// ```
    pub fn page_size(&self, width: u32, height: u32) -> (f32, f32) {
        let scale = 72.0 / self.resolution;
        (width as f32 * scale, height as f32 * scale)
    }

    /// Build a document with one page per image, in the given order.
    ///
    /// Images are converted to 8-bit RGB; transparency is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::FailedToLoadImage`] for the first file that
    /// cannot be decoded, or [`PdfPagesError::MergeFailed`] if `files` is
    /// empty.
    pub fn build(&self, files: &[PathBuf]) -> Result<Document> {
        if files.is_empty() {
            return Err(PdfPagesError::merge_failed("no images to merge"));
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::with_capacity(files.len());
        for path in files {
            let page_id = self.add_image_page(&mut doc, pages_id, path)?;
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }

    fn add_image_page(&self, doc: &mut Document, pages_id: ObjectId, path: &Path) -> Result<ObjectId> {
        let image = image::open(path)
            .map_err(|e| PdfPagesError::failed_to_load_image(path.to_path_buf(), e.to_string()))?
            .to_rgb8();
        let (width, height) = image.dimensions();
        let (page_width, page_height) = self.page_size(width, height);

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            image.into_raw(),
        ));

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        page_width.into(),
                        0.into(),
                        0.into(),
                        page_height.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(XOBJECT_NAME.to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
            "Contents" => content_id,
        });

        log::debug!(
            "embedded {} ({width}x{height} px, {page_width:.2}x{page_height:.2} pt)",
            path.display()
        );
        Ok(page_id)
    }
}

impl Default for ImageDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
