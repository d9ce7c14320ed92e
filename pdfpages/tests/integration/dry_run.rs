//! Integration tests for planning without writing.

use pdfpages::config::{ExtractionRequest, MergeRequest, PageFormat, PageRange};
use pdfpages::error::PdfPagesError;
use pdfpages::extract::Extractor;
use pdfpages::merge::Merger;
use tempfile::TempDir;

use crate::common::{SolidRenderer, write_pdf};

#[test]
fn test_extraction_plan_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let pdf = temp_dir.path().join("book.pdf");
    write_pdf(&pdf, 4);

    let request = ExtractionRequest::new(&pdf, PageFormat::Pdf, PageRange::new(3, 9).unwrap());
    let plan = Extractor::with_renderer(SolidRenderer)
        .plan(&request, temp_dir.path())
        .unwrap();

    assert_eq!(plan.total_pages, 4);
    assert_eq!(plan.output_dir, temp_dir.path().join("book"));
    let paths: Vec<_> = plan.pages.iter().map(|p| p.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            temp_dir.path().join("book/page_3.pdf"),
            temp_dir.path().join("book/page_4.pdf"),
        ]
    );
    assert!(!plan.output_dir.exists());
}

#[test]
fn test_image_plan_rejects_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    let pdf = temp_dir.path().join("book.pdf");
    write_pdf(&pdf, 2);

    let request = ExtractionRequest::new(&pdf, PageFormat::Image, PageRange::new(1, 3).unwrap());
    let err = Extractor::with_renderer(SolidRenderer)
        .plan(&request, temp_dir.path())
        .unwrap_err();

    assert!(matches!(
        err,
        PdfPagesError::PageOutOfRange {
            total_pages: 2,
            ..
        }
    ));
}

#[test]
fn test_merge_plan_serializes() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("book");
    std::fs::create_dir(&folder).unwrap();
    write_pdf(&folder.join("page_1.pdf"), 1);

    let plan = Merger::new()
        .plan(&MergeRequest::new(
            &folder,
            temp_dir.path().join("book_merged.pdf"),
            PageFormat::Pdf,
        ))
        .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["format"], "pdf");
    assert_eq!(json["inputs"].as_array().unwrap().len(), 1);
}
