//! Folder merging.
//!
//! Combines the `*.png` or `*.pdf` files of one folder into a single PDF:
//! - PDF inputs are concatenated page tree by page tree
//! - Image inputs become one page each, laid out at 100 DPI
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::config::{MergeRequest, PageFormat, SortOrder};
//! use pdfpages::merge::Merger;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = MergeRequest::new("scans", "scans_merged.pdf", PageFormat::Image)
//!     .with_order(SortOrder::Numeric);
//! let report = Merger::new().merge(&request)?;
//! println!("{} pages", report.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod images;
pub mod merger;

pub use images::{ImageDocumentBuilder, MERGE_RESOLUTION_DPI};
pub use merger::{MergePlan, MergeReport, Merger, merge_documents};

use crate::config::MergeRequest;
use crate::error::Result;

/// Merge a folder with a default [`Merger`].
///
/// # Errors
///
/// See [`Merger::merge`].
pub fn merge_folder(request: &MergeRequest) -> Result<MergeReport> {
    Merger::new().merge(request)
}
