//! Integration tests for page extraction.

use pdfpages::config::{ExtractionRequest, PageFormat, PageRange};
use pdfpages::extract::Extractor;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{SolidRenderer, file_names, page_count, page_widths, page_width, write_pdf};

fn source(pages: u32) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let pdf = temp_dir.path().join("report.pdf");
    write_pdf(&pdf, pages);
    (temp_dir, pdf)
}

#[test]
fn test_extract_pdf_pages() {
    let (temp_dir, pdf) = source(5);
    let request = ExtractionRequest::new(&pdf, PageFormat::Pdf, PageRange::new(2, 4).unwrap());

    let report = Extractor::with_renderer(SolidRenderer)
        .extract(&request, temp_dir.path())
        .unwrap();

    assert_eq!(report.output_dir, temp_dir.path().join("report"));
    assert_eq!(
        file_names(&report.output_dir),
        vec!["page_2.pdf", "page_3.pdf", "page_4.pdf"]
    );

    for file in &report.pages {
        assert_eq!(page_count(&file.path), 1);
        assert_eq!(page_widths(&file.path), vec![page_width(file.page_number)]);
    }
}

#[test]
fn test_extract_pdf_clamps_to_last_page() {
    let (temp_dir, pdf) = source(3);
    let request = ExtractionRequest::new(&pdf, PageFormat::Pdf, PageRange::new(2, 10).unwrap());

    let report = Extractor::with_renderer(SolidRenderer)
        .extract(&request, temp_dir.path())
        .unwrap();

    let numbers: Vec<u32> = report.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![2, 3]);
    assert_eq!(file_names(&report.output_dir), vec!["page_2.pdf", "page_3.pdf"]);
}

#[test]
fn test_extract_pdf_range_past_end_writes_nothing() {
    let (temp_dir, pdf) = source(2);
    let request = ExtractionRequest::new(&pdf, PageFormat::Pdf, PageRange::new(5, 6).unwrap());

    let report = Extractor::with_renderer(SolidRenderer)
        .extract(&request, temp_dir.path())
        .unwrap();

    assert!(report.pages.is_empty());
    assert!(report.output_dir.is_dir());
    assert!(file_names(&report.output_dir).is_empty());
}

#[rstest]
#[case(72.0)]
#[case(200.0)]
fn test_extract_images(#[case] dpi: f32) {
    let (temp_dir, pdf) = source(4);
    let request = ExtractionRequest::new(&pdf, PageFormat::Image, PageRange::new(1, 3).unwrap())
        .with_dpi(dpi);

    let report = Extractor::with_renderer(SolidRenderer)
        .extract(&request, temp_dir.path())
        .unwrap();

    assert_eq!(
        file_names(&report.output_dir),
        vec!["page_1.png", "page_2.png", "page_3.png"]
    );

    let side = SolidRenderer::side(dpi);
    for file in &report.pages {
        let image = image::open(&file.path).unwrap();
        assert_eq!((image.width(), image.height()), (side, side));
    }
}

#[test]
fn test_extract_reuses_existing_directory() {
    let (temp_dir, pdf) = source(3);
    let extractor = Extractor::with_renderer(SolidRenderer);

    let first = ExtractionRequest::new(&pdf, PageFormat::Pdf, PageRange::new(1, 1).unwrap());
    extractor.extract(&first, temp_dir.path()).unwrap();

    let second = ExtractionRequest::new(&pdf, PageFormat::Pdf, PageRange::new(1, 2).unwrap());
    let report = extractor.extract(&second, temp_dir.path()).unwrap();

    assert_eq!(file_names(&report.output_dir), vec!["page_1.pdf", "page_2.pdf"]);
}

#[test]
fn test_extract_mixed_formats_share_directory() {
    let (temp_dir, pdf) = source(2);
    let extractor = Extractor::with_renderer(SolidRenderer);
    let range = PageRange::new(1, 2).unwrap();

    extractor
        .extract(&ExtractionRequest::new(&pdf, PageFormat::Pdf, range), temp_dir.path())
        .unwrap();
    let report = extractor
        .extract(&ExtractionRequest::new(&pdf, PageFormat::Image, range), temp_dir.path())
        .unwrap();

    assert_eq!(
        file_names(&report.output_dir),
        vec!["page_1.pdf", "page_1.png", "page_2.pdf", "page_2.png"]
    );
}
