//! Extraction followed by a merge of the extracted folder.

use pdfpages::config::{Config, PageFormat, PageRange, SortOrder};
use pdfpages::extract::Extractor;
use pdfpages::merge::Merger;
use pdfpages::validation::Validator;
use tempfile::TempDir;

use crate::common::{SolidRenderer, page_count, page_widths, write_pdf};

fn run(config: &Config) -> std::path::PathBuf {
    Validator::new().validate_config(config).unwrap();

    let extraction = config.extraction_request().unwrap();
    Extractor::with_renderer(SolidRenderer)
        .extract(&extraction, config.output_root())
        .unwrap();

    let merge = config.merge_request().unwrap();
    Merger::new().merge(&merge).unwrap().output
}

#[test]
fn test_pdf_pages_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let pdf = temp_dir.path().join("doc.pdf");
    write_pdf(&pdf, 5);

    // The folder only exists once extraction has run.
    let config = Config {
        source: Some(pdf),
        format: PageFormat::Pdf,
        range: PageRange::new(1, 3).unwrap(),
        merge: true,
        folder: Some(temp_dir.path().join("doc")),
        output_root: temp_dir.path().to_path_buf(),
        ..Config::default()
    };

    let merged = run(&config);
    assert_eq!(merged, temp_dir.path().join("doc_merged.pdf"));
    assert_eq!(page_count(&merged), 3);
    assert_eq!(page_widths(&merged), vec![501.0, 502.0, 503.0]);
}

#[test]
fn test_image_pages_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let pdf = temp_dir.path().join("scan.pdf");
    write_pdf(&pdf, 4);

    let config = Config {
        source: Some(pdf),
        format: PageFormat::Image,
        range: PageRange::new(2, 4).unwrap(),
        merge: true,
        folder: Some(temp_dir.path().join("scan")),
        output_root: temp_dir.path().to_path_buf(),
        dpi: 100.0,
        ..Config::default()
    };

    let merged = run(&config);
    assert_eq!(merged, temp_dir.path().join("scan_merged.pdf"));
    assert_eq!(page_count(&merged), 3);

    // Rendering and merging both at 100 dpi keeps the image size in points.
    let side = SolidRenderer::side(100.0) as f32 * 0.72;
    for width in page_widths(&merged) {
        assert!((width - side).abs() < 0.01);
    }
}

#[test]
fn test_numeric_round_trip_past_page_nine() {
    let temp_dir = TempDir::new().unwrap();
    let pdf = temp_dir.path().join("long.pdf");
    write_pdf(&pdf, 12);

    let config = Config {
        source: Some(pdf),
        format: PageFormat::Pdf,
        range: PageRange::new(8, 12).unwrap(),
        merge: true,
        folder: Some(temp_dir.path().join("long")),
        output_root: temp_dir.path().to_path_buf(),
        order: SortOrder::Numeric,
        ..Config::default()
    };

    let merged = run(&config);
    assert_eq!(
        page_widths(&merged),
        vec![508.0, 509.0, 510.0, 511.0, 512.0]
    );
}
