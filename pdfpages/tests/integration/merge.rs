//! Integration tests for folder merging.

use lopdf::Document;
use pdfpages::config::{MergeRequest, PageFormat, SortOrder};
use pdfpages::merge::{Merger, merge_folder};
use tempfile::TempDir;

use crate::common::{media_box, page_count, page_widths, write_pdf, write_png};

#[test]
fn test_merge_pdf_folder_in_name_order() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("parts");
    std::fs::create_dir(&folder).unwrap();
    write_pdf(&folder.join("b.pdf"), 2);
    write_pdf(&folder.join("a.pdf"), 1);
    write_pdf(&folder.join("c.pdf"), 3);
    std::fs::write(folder.join("notes.txt"), "ignored").unwrap();

    let output = temp_dir.path().join("parts_merged.pdf");
    let report = merge_folder(&MergeRequest::new(&folder, &output, PageFormat::Pdf)).unwrap();

    let names: Vec<_> = report
        .inputs
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
    assert_eq!(report.total_pages, 6);
    assert_eq!(page_count(&output), 6);
    assert_eq!(
        page_widths(&output),
        vec![501.0, 501.0, 502.0, 501.0, 502.0, 503.0]
    );
    assert!(report.output_size > 0);
}

#[test]
fn test_merge_lexical_and_numeric_order() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("pages");
    std::fs::create_dir(&folder).unwrap();
    write_pdf(&folder.join("page_10.pdf"), 2);
    write_pdf(&folder.join("page_2.pdf"), 1);

    let lexical = Merger::new()
        .merge(&MergeRequest::new(
            &folder,
            temp_dir.path().join("lexical.pdf"),
            PageFormat::Pdf,
        ))
        .unwrap();
    assert_eq!(page_widths(&lexical.output), vec![501.0, 502.0, 501.0]);

    let numeric = Merger::new()
        .merge(
            &MergeRequest::new(&folder, temp_dir.path().join("numeric.pdf"), PageFormat::Pdf)
                .with_order(SortOrder::Numeric),
        )
        .unwrap();
    assert_eq!(page_widths(&numeric.output), vec![501.0, 501.0, 502.0]);
}

#[test]
fn test_merge_images_page_size() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("scans");
    std::fs::create_dir(&folder).unwrap();
    write_png(&folder.join("page_1.png"), 200, 100);
    write_png(&folder.join("page_2.png"), 50, 80);

    let output = temp_dir.path().join("scans_merged.pdf");
    let report = merge_folder(&MergeRequest::new(&folder, &output, PageFormat::Image)).unwrap();
    assert_eq!(report.total_pages, 2);

    let doc = Document::load(&output).unwrap();
    let boxes: Vec<Vec<f32>> = doc
        .get_pages()
        .values()
        .map(|id| media_box(&doc, *id))
        .collect();

    let expected = [(144.0, 72.0), (36.0, 57.6)];
    for (mb, (w, h)) in boxes.iter().zip(expected) {
        assert!((mb[2] - w).abs() < 0.01, "width {} != {w}", mb[2]);
        assert!((mb[3] - h).abs() < 0.01, "height {} != {h}", mb[3]);
    }
}

#[test]
fn test_merge_creates_output_parent() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("doc");
    std::fs::create_dir(&folder).unwrap();
    write_pdf(&folder.join("page_1.pdf"), 1);

    let output = temp_dir.path().join("out/nested/doc_merged.pdf");
    Merger::new()
        .merge(&MergeRequest::new(&folder, &output, PageFormat::Pdf))
        .unwrap();
    assert_eq!(page_count(&output), 1);
}

#[test]
fn test_merge_plan_lists_inputs_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("doc");
    std::fs::create_dir(&folder).unwrap();
    write_png(&folder.join("page_1.png"), 10, 10);
    write_pdf(&folder.join("page_1.pdf"), 1);

    let output = temp_dir.path().join("doc_merged.pdf");
    let plan = Merger::new()
        .plan(&MergeRequest::new(&folder, &output, PageFormat::Image))
        .unwrap();

    assert_eq!(plan.inputs, vec![folder.join("page_1.png")]);
    assert!(!output.exists());
}
