//! Integration tests for error handling and edge cases.

use pdfpages::config::{Config, ExtractionRequest, MergeRequest, PageFormat, PageRange};
use pdfpages::error::PdfPagesError;
use pdfpages::extract::Extractor;
use pdfpages::merge::Merger;
use pdfpages::validation::Validator;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{SolidRenderer, file_names, write_pdf, write_png};

#[test]
fn test_error_missing_source() {
    let temp_dir = TempDir::new().unwrap();
    let request = ExtractionRequest::new(
        temp_dir.path().join("missing.pdf"),
        PageFormat::Pdf,
        PageRange::default(),
    );

    let err = Extractor::with_renderer(SolidRenderer)
        .extract(&request, temp_dir.path())
        .unwrap_err();
    assert!(matches!(err, PdfPagesError::SourceNotFound { .. }));
    assert!(!temp_dir.path().join("missing").exists());
}

#[test]
fn test_error_image_range_past_end_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let pdf = temp_dir.path().join("short.pdf");
    write_pdf(&pdf, 3);

    let request = ExtractionRequest::new(&pdf, PageFormat::Image, PageRange::new(2, 5).unwrap());
    let err = Extractor::with_renderer(SolidRenderer)
        .extract(&request, temp_dir.path())
        .unwrap_err();

    assert!(matches!(
        err,
        PdfPagesError::PageOutOfRange {
            start: 2,
            end: 5,
            total_pages: 3,
            ..
        }
    ));
    assert!(!temp_dir.path().join("short").exists());
}

#[test]
fn test_error_corrupt_source() {
    let temp_dir = TempDir::new().unwrap();
    let pdf = temp_dir.path().join("broken.pdf");
    std::fs::write(&pdf, b"this is not a pdf").unwrap();

    let request = ExtractionRequest::new(&pdf, PageFormat::Pdf, PageRange::default());
    let err = Extractor::with_renderer(SolidRenderer)
        .extract(&request, temp_dir.path())
        .unwrap_err();
    assert!(matches!(err, PdfPagesError::FailedToLoadPdf { .. }));
}

#[rstest]
#[case(PageFormat::Pdf, "pdf")]
#[case(PageFormat::Image, "png")]
fn test_error_no_matching_files(#[case] format: PageFormat, #[case] extension: &str) {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("empty");
    std::fs::create_dir(&folder).unwrap();
    std::fs::write(folder.join("readme.txt"), "nothing here").unwrap();

    let output = temp_dir.path().join("empty_merged.pdf");
    let err = Merger::new()
        .merge(&MergeRequest::new(&folder, &output, format))
        .unwrap_err();

    match err {
        PdfPagesError::NoFilesToMerge { extension: ext, .. } => assert_eq!(ext, extension),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_error_missing_folder() {
    let temp_dir = TempDir::new().unwrap();
    let err = Merger::new()
        .merge(&MergeRequest::new(
            temp_dir.path().join("nowhere"),
            temp_dir.path().join("nowhere_merged.pdf"),
            PageFormat::Pdf,
        ))
        .unwrap_err();
    assert!(matches!(err, PdfPagesError::FolderNotFound { .. }));
}

#[test]
fn test_error_undecodable_image_writes_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("scans");
    std::fs::create_dir(&folder).unwrap();
    write_png(&folder.join("page_1.png"), 10, 10);
    std::fs::write(folder.join("page_2.png"), b"not an image").unwrap();

    let output = temp_dir.path().join("scans_merged.pdf");
    let err = Merger::new()
        .merge(&MergeRequest::new(&folder, &output, PageFormat::Image))
        .unwrap_err();

    assert!(matches!(err, PdfPagesError::FailedToLoadImage { .. }));
    assert!(!output.exists());
    assert_eq!(file_names(&folder), vec!["page_1.png", "page_2.png"]);
}

#[test]
fn test_error_merge_only_with_missing_folder() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        merge: true,
        folder: Some(temp_dir.path().join("nowhere")),
        output_root: temp_dir.path().to_path_buf(),
        ..Config::default()
    };

    let err = Validator::new().validate_config(&config).unwrap_err();
    assert!(matches!(err, PdfPagesError::FolderNotFound { .. }));
}

#[test]
fn test_error_merge_without_folder() {
    let config = Config {
        merge: true,
        ..Config::default()
    };
    assert!(config.validate().is_err());
}
