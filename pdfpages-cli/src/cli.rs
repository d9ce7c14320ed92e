//! CLI argument parsing for pdfpages.
//!
//! This module defines the command-line interface using `clap` and converts
//! it into a validated library [`Config`].

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use pdfpages::config::{Config, DEFAULT_DPI, PageFormat, PageRange, SortOrder};
use pdfpages::error::{PdfPagesError, Result};

/// Split PDF pages into images or single-page PDFs, and merge them back.
///
/// Pages are written to a directory named after the source PDF as
/// page_<n>.png or page_<n>.pdf. A folder of such files can be merged into
/// <folder>_merged.pdf.
#[derive(Parser, Debug)]
#[command(name = "pdfpages")]
#[command(version)]
#[command(about = "Split PDF pages into images or single-page PDFs, and merge them back", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Source PDF to extract pages from
    ///
    /// Examples:
    ///   pdfpages book.pdf -r 1 5
    ///   pdfpages book.pdf -f pdf -r 3 8
    #[arg(value_name = "PDF_PATH")]
    pub pdf_path: Option<PathBuf>,

    /// Kind of file to produce per page, and to merge
    ///
    /// - image: PNG rendered at --dpi (alias: png)
    /// - pdf: single-page PDF
    #[arg(short, long, value_name = "FORMAT", default_value = "image")]
    #[arg(value_parser = ["image", "png", "pdf"])]
    pub format: String,

    /// First and last page to extract (1-based, inclusive)
    ///
    /// Image extraction fails if END is past the last page. PDF extraction
    /// stops at the last page.
    #[arg(short, long, num_args = 2, value_names = ["START", "END"])]
    #[arg(default_values_t = [1u32, 10u32])]
    pub range: Vec<u32>,

    /// Merge the files of --folder into one PDF
    #[arg(short, long)]
    pub merge: bool,

    /// Folder whose files are merged
    #[arg(long, value_name = "DIR")]
    pub folder: Option<PathBuf>,

    /// Root directory for extracted pages and the merged PDF
    ///
    /// Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Merged PDF path, instead of <output-dir>/<folder>_merged.pdf
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Resolution for image extraction
    #[arg(long, value_name = "N", default_value_t = DEFAULT_DPI)]
    pub dpi: f32,

    /// Merge page_2 before page_10
    ///
    /// By default files are merged in plain name order.
    #[arg(long)]
    pub numeric_sort: bool,

    /// Directory containing the Pdfium shared library
    #[arg(long, value_name = "DIR", env = "PDFIUM_LIB_DIR")]
    pub pdfium_lib: Option<PathBuf>,

    /// Show what would be written without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the extraction and merge reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show per-page details and debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Whether any pipeline was requested.
    pub fn has_work(&self) -> bool {
        self.pdf_path.is_some() || self.merge
    }

    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The format or range is invalid
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let format = PageFormat::from_str(&self.format)?;
        let range = self.page_range()?;

        let config = Config {
            source: self.pdf_path.clone(),
            format,
            range,
            merge: self.merge,
            folder: self.folder.clone(),
            merge_output: self.output.clone(),
            output_root: self
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            order: if self.numeric_sort {
                SortOrder::Numeric
            } else {
                SortOrder::Lexical
            },
            dpi: self.dpi,
            pdfium_lib: self.pdfium_lib.clone(),
            dry_run: self.dry_run,
            json: self.json,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        config.validate()?;
        Ok(config)
    }

    fn page_range(&self) -> Result<PageRange> {
        match self.range.as_slice() {
            [start, end] => PageRange::new(*start, *end),
            other => Err(PdfPagesError::invalid_config(format!(
                "--range takes START END, got {} value(s)",
                other.len()
            ))),
        }
    }
}
