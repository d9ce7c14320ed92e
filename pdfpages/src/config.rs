//! Configuration module for pdfpages.
//!
//! This module holds the request types consumed by the extractor and merger
//! and the [`Config`] the CLI builds from its arguments. It handles:
//! - Parsing of enumerated options
//! - Page range invariants
//! - Validation of argument combinations
//! - Derivation of per-operation requests

use anyhow::{Result, bail};
use serde::Serialize;

use crate::PdfPagesError;
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Default raster resolution for image extraction.
pub const DEFAULT_DPI: f32 = 200.0;

/// Default first page of the extraction range.
pub const DEFAULT_FIRST_PAGE: u32 = 1;

/// Default last page of the extraction range.
pub const DEFAULT_LAST_PAGE: u32 = 10;

/// Kind of per-page artifact produced by extraction and consumed by merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    /// Raster image (PNG).
    #[default]
    Image,
    /// Single-page PDF document.
    Pdf,
}

impl PageFormat {
    /// File extension of artifacts in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Image => "png",
            Self::Pdf => "pdf",
        }
    }

    /// Extension of the merged document. Both formats merge into a PDF.
    pub fn merged_extension(&self) -> &'static str {
        "pdf"
    }
}

impl FromStr for PageFormat {
    type Err = crate::PdfPagesError;

    /// Parse a format name: "image" (or "png") or "pdf".
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "image" | "png" => Ok(Self::Image),
            "pdf" => Ok(Self::Pdf),
            _ => Err(PdfPagesError::InvalidConfig {
                message: format!("Invalid format: {s}. Must be one of: image, pdf"),
            }),
        }
    }
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Pdf => write!(f, "pdf"),
        }
    }
}

/// Order in which merge inputs are concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Plain file name comparison. `page_10` sorts before `page_2`.
    #[default]
    Lexical,
    /// Digit runs compare by value, so `page_2` sorts before `page_10`.
    Numeric,
}

/// Inclusive, 1-based page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// Create a range, enforcing `1 <= start <= end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfpages::config::PageRange;
    ///
    /// let range = PageRange::new(2, 4).unwrap();
    /// assert_eq!(range.len(), 3);
    /// assert!(PageRange::new(0, 4).is_err());
    /// assert!(PageRange::new(5, 4).is_err());
    /// ```
    pub fn new(start: u32, end: u32) -> crate::Result<Self> {
        if start == 0 || end < start {
            return Err(PdfPagesError::InvalidPageRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First page (1-based).
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last page (1-based, inclusive).
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of pages covered.
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// Always false; a valid range covers at least one page.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a page number is included in this range.
    pub fn contains(&self, page: u32) -> bool {
        page >= self.start && page <= self.end
    }

    /// Pages of this range that exist in a document of `total_pages` pages.
    ///
    /// The upper bound is clamped; the result is empty when `start` lies past
    /// the end of the document.
    pub fn clamped_pages(&self, total_pages: u32) -> Vec<u32> {
        (self.start..=self.end.min(total_pages)).collect()
    }

    /// Whether every page of the range exists in the document.
    pub fn fits(&self, total_pages: u32) -> bool {
        self.end <= total_pages
    }
}

impl Default for PageRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_FIRST_PAGE,
            end: DEFAULT_LAST_PAGE,
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Input to a single extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    /// Source PDF.
    pub source: PathBuf,
    /// Artifact kind to produce.
    pub format: PageFormat,
    /// Pages to extract.
    pub range: PageRange,
    /// Raster resolution for [`PageFormat::Image`].
    pub dpi: f32,
}

impl ExtractionRequest {
    /// Request with the default resolution.
    pub fn new(source: impl Into<PathBuf>, format: PageFormat, range: PageRange) -> Self {
        Self {
            source: source.into(),
            format,
            range,
            dpi: DEFAULT_DPI,
        }
    }

    /// Override the raster resolution.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }
}

/// Input to a single merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Folder whose files are merged.
    pub folder: PathBuf,
    /// Merged document path.
    pub output: PathBuf,
    /// Which files to pick up.
    pub format: PageFormat,
    /// Concatenation order.
    pub order: SortOrder,
}

impl MergeRequest {
    /// Request with lexical ordering.
    pub fn new(folder: impl Into<PathBuf>, output: impl Into<PathBuf>, format: PageFormat) -> Self {
        Self {
            folder: folder.into(),
            output: output.into(),
            format,
            order: SortOrder::default(),
        }
    }

    /// Override the concatenation order.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

/// Complete configuration for one invocation of the tool.
///
/// Built from CLI arguments; the extractor and merger receive the narrower
/// requests derived from it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source PDF to extract pages from.
    pub source: Option<PathBuf>,

    /// Artifact format for both pipelines.
    pub format: PageFormat,

    /// Pages to extract.
    pub range: PageRange,

    /// Run the merge pipeline.
    pub merge: bool,

    /// Folder to merge.
    pub folder: Option<PathBuf>,

    /// Explicit merge output; derived from the folder name when absent.
    pub merge_output: Option<PathBuf>,

    /// Root for extraction directories and the derived merge output.
    pub output_root: PathBuf,

    /// Merge ordering.
    pub order: SortOrder,

    /// Raster resolution for image extraction.
    pub dpi: f32,

    /// Directory containing the Pdfium shared library.
    pub pdfium_lib: Option<PathBuf>,

    /// Validate and report without writing.
    pub dry_run: bool,

    /// Print reports as JSON.
    pub json: bool,

    /// Suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            format: PageFormat::default(),
            range: PageRange::default(),
            merge: false,
            folder: None,
            merge_output: None,
            output_root: PathBuf::from("."),
            order: SortOrder::default(),
            dpi: DEFAULT_DPI,
            pdfium_lib: None,
            dry_run: false,
            json: false,
            quiet: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies and invalid combinations. File
    /// system checks are left to [`crate::validation::Validator`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither extraction nor merge is requested
    /// - Merge is requested without a folder
    /// - Verbose and quiet modes are both enabled
    /// - The resolution is not a positive number
    pub fn validate(&self) -> Result<()> {
        if !self.has_work() {
            bail!("Nothing to do: provide a PDF path or --merge");
        }

        if self.merge && self.folder.is_none() {
            bail!(PdfPagesError::MissingFolder);
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            bail!("Resolution must be a positive number, got {}", self.dpi);
        }

        Ok(())
    }

    /// Whether the invocation asks for any pipeline.
    pub fn has_work(&self) -> bool {
        self.source.is_some() || self.merge
    }

    /// Extraction request, if a source was given.
    pub fn extraction_request(&self) -> Option<ExtractionRequest> {
        self.source.as_ref().map(|source| {
            ExtractionRequest::new(source.clone(), self.format, self.range).with_dpi(self.dpi)
        })
    }

    /// Merge request, if merging was requested with a folder.
    ///
    /// The output defaults to `<output_root>/<folder stem>_merged.pdf`.
    pub fn merge_request(&self) -> Option<MergeRequest> {
        if !self.merge {
            return None;
        }

        let folder = self.folder.as_ref()?;
        let output = match &self.merge_output {
            Some(output) => output.clone(),
            None => crate::paths::merged_output_path(&self.output_root, folder, self.format),
        };

        Some(MergeRequest::new(folder.clone(), output, self.format).with_order(self.order))
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }

    /// Output root as a path.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}
