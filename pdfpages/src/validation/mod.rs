//! Input validation for pdfpages.
//!
//! Pre-flight checks run before any extraction or merge writes to disk:
//! - Source file existence
//! - Merge folder existence
//! - Output root existence
//! - Source document inspection for verbose and dry-run output
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::validation::Validator;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! validator.validate_source(Path::new("book.pdf"))?;
//! let info = validator.inspect_source(Path::new("book.pdf"))?;
//! println!("PDF has {} pages", info.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::{Document, Object};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{PdfPagesError, Result};
use crate::io::PdfReader;

/// Facts about a source PDF.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    /// Path to the inspected file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: u32,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// First page dimensions (width, height) in points, if declared on the page.
    pub page_dimensions: Option<(f32, f32)>,
}

impl SourceInfo {
    fn from_document(path: PathBuf, doc: &Document, file_size: u64) -> Self {
        let pages = doc.get_pages();

        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        let page_dimensions = pages.values().next().and_then(|page_id| {
            let page = doc.get_dictionary(*page_id).ok()?;
            match page.get(b"MediaBox").ok()? {
                Object::Array(arr) if arr.len() >= 4 => {
                    let width = arr[2].as_float().ok()?;
                    let height = arr[3].as_float().ok()?;
                    Some((width, height))
                }
                _ => None,
            }
        });

        Self {
            path,
            page_count: pages.len() as u32,
            version,
            file_size,
            page_dimensions,
        }
    }
}

/// Validator for paths and configuration.
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Check that the source PDF exists and is a regular file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::SourceNotFound`] or [`PdfPagesError::NotAFile`].
    pub fn validate_source(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PdfPagesError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(PdfPagesError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Check that the merge folder exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::FolderNotFound`] or
    /// [`PdfPagesError::NotADirectory`].
    pub fn validate_folder(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PdfPagesError::FolderNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(PdfPagesError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Check that the output root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::InvalidConfig`] if the root is missing and
    /// [`PdfPagesError::NotADirectory`] if it is something else.
    pub fn validate_output_root(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PdfPagesError::invalid_config(format!(
                "Output directory does not exist: {}",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(PdfPagesError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Run every filesystem check the configuration calls for.
    ///
    /// Argument consistency is checked first through [`Config::validate`].
    /// The merge folder is only checked for merge-only runs; when extraction
    /// runs first it may create the folder.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn validate_config(&self, config: &Config) -> Result<()> {
        config.validate()?;

        if let Some(source) = &config.source {
            self.validate_source(source)?;
        }
        if config.merge
            && config.source.is_none()
            && let Some(folder) = &config.folder
        {
            self.validate_folder(folder)?;
        }
        self.validate_output_root(&config.output_root)
    }

    /// Load `path` and describe it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn inspect_source(&self, path: &Path) -> Result<SourceInfo> {
        self.validate_source(path)?;
        let loaded = PdfReader::new().load(path)?;
        Ok(SourceInfo::from_document(
            loaded.path,
            &loaded.document,
            loaded.file_size,
        ))
    }
}
