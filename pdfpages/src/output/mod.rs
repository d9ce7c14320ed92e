//! Output formatting and display for pdfpages.
//!
//! This module handles user-facing output:
//! - Formatted status messages
//! - Extraction and merge summaries
//! - Dry-run plans
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::output::OutputFormatter;
//! use pdfpages::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting extraction");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::extract::{ExtractionPlan, ExtractionReport};
use crate::merge::{MergePlan, MergeReport};
use crate::validation::SourceInfo;

/// Display the outcome of an extraction.
pub fn display_extraction_report(formatter: &OutputFormatter, report: &ExtractionReport) {
    if report.pages.is_empty() {
        formatter.warning(&extraction_summary(report));
        return;
    }

    formatter.success(&extraction_summary(report));
    for page in &report.pages {
        formatter.detail(&format!("page {}", page.page_number), &page.path.display().to_string());
    }
}

/// One-line summary of an extraction.
pub fn extraction_summary(report: &ExtractionReport) -> String {
    if report.pages.is_empty() {
        return format!(
            "No pages extracted from {}: range starts past the last page",
            report.source.display()
        );
    }
    format!(
        "Extracted {} page(s) from {} to {}",
        report.pages.len(),
        report.source.display(),
        report.output_dir.display()
    )
}

/// Display the outcome of a merge.
pub fn display_merge_report(formatter: &OutputFormatter, report: &MergeReport) {
    formatter.success(&merge_summary(report));
    formatter.detail("Time", &format!("{:.2}s", report.merge_time.as_secs_f64()));
}

/// One-line summary of a merge.
pub fn merge_summary(report: &MergeReport) -> String {
    format!(
        "Merged {} file(s) into {} ({} pages, {})",
        report.inputs.len(),
        report.output.display(),
        report.total_pages,
        report.format_output_size()
    )
}

/// Display what an extraction would write.
pub fn display_extraction_plan(formatter: &OutputFormatter, plan: &ExtractionPlan) {
    formatter.section(&extraction_plan_header(plan));
    for (idx, page) in plan.pages.iter().enumerate() {
        formatter.list_item(idx + 1, &page.path.display().to_string());
    }
}

/// Header line of an extraction plan.
pub fn extraction_plan_header(plan: &ExtractionPlan) -> String {
    format!(
        "Would extract {} of {} page(s) from {} as {}:",
        plan.pages.len(),
        plan.total_pages,
        plan.source.display(),
        plan.format
    )
}

/// Display what a merge would read and write.
pub fn display_merge_plan(formatter: &OutputFormatter, plan: &MergePlan) {
    formatter.section(&merge_plan_header(plan));
    for (idx, input) in plan.inputs.iter().enumerate() {
        formatter.list_item(idx + 1, &input.display().to_string());
    }
}

/// Header line of a merge plan.
pub fn merge_plan_header(plan: &MergePlan) -> String {
    format!(
        "Would merge {} file(s) into {}:",
        plan.inputs.len(),
        plan.output.display()
    )
}

/// Display facts about a source document. Verbose mode only.
pub fn display_source_info(formatter: &OutputFormatter, info: &SourceInfo) {
    for (label, value) in source_info_details(info) {
        formatter.detail(label, &value);
    }
}

/// Labelled facts about a source document, in display order.
pub fn source_info_details(info: &SourceInfo) -> Vec<(&'static str, String)> {
    let mut details = vec![
        ("Source", info.path.display().to_string()),
        ("Pages", info.page_count.to_string()),
    ];
    if let Some((major, minor)) = info.version {
        details.push(("Version", format!("{major}.{minor}")));
    }
    details.push(("Size", crate::io::format_file_size(info.file_size)));
    if let Some((width, height)) = info.page_dimensions {
        details.push(("Page size", format!("{width:.0} x {height:.0} pt")));
    }
    details
}
