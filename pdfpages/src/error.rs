//! Error types for pdfpages.
//!
//! Every fallible operation in the library returns [`Result`]. Errors carry
//! the path or page they concern so the CLI can print an actionable message.
//!
//! # Error Categories
//!
//! - **Validation**: bad arguments, missing source file or folder, invalid
//!   page ranges. Nothing has been written when these are returned.
//! - **Operation**: decode, render, write or merge failures raised while an
//!   extraction or merge is running. Files written before the failure remain
//!   on disk.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfpages operations.
pub type Result<T> = std::result::Result<T, PdfPagesError>;

/// Broad classification of a [`PdfPagesError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected input; raised before any work is done.
    Validation,
    /// Failure inside an extraction or merge.
    Operation,
}

/// Main error type for pdfpages operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfPagesError {
    /// Source PDF does not exist.
    #[error("File '{}' does not exist", path.display())]
    SourceNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Merge folder does not exist.
    #[error("Folder '{}' does not exist", path.display())]
    FolderNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Path exists but is not a directory.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// Merge was requested without a folder.
    #[error("Please provide a folder to merge files from (--folder DIR)")]
    MissingFolder,

    /// Page range violates `1 <= start <= end`.
    #[error("Invalid page range {start}-{end}: pages are 1-based and start must not exceed end")]
    InvalidPageRange {
        /// Requested first page.
        start: u32,
        /// Requested last page.
        end: u32,
    },

    /// Requested pages lie beyond the end of the document.
    #[error(
        "Page range {start}-{end} is out of bounds for {}\n  PDF has {total_pages} page(s)",
        path.display()
    )]
    PageOutOfRange {
        /// Source document.
        path: PathBuf,
        /// Requested first page.
        start: u32,
        /// Requested last page.
        end: u32,
        /// Pages actually present.
        total_pages: u32,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// Output directory could not be created.
    #[error("Failed to create output directory: {}\n  Reason: {source}", path.display())]
    FailedToCreateDirectory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// PDF could not be parsed.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the parser.
        reason: String,
    },

    /// PDF is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Image could not be opened or decoded.
    #[error("Failed to load image: {}\n  Reason: {reason}", path.display())]
    FailedToLoadImage {
        /// Path to the image file.
        path: PathBuf,
        /// Reason reported by the decoder.
        reason: String,
    },

    /// The Pdfium library could not be bound.
    #[error(
        "PDF renderer unavailable: {reason}\n  \
         Hint: install libpdfium or point --pdfium-lib at the directory containing it"
    )]
    RendererUnavailable {
        /// Binding failure.
        reason: String,
    },

    /// A page failed to rasterize.
    #[error("Failed to render page {page}: {reason}")]
    RenderFailed {
        /// 1-based page number.
        page: u32,
        /// Renderer message.
        reason: String,
    },

    /// A rendered page could not be encoded to disk.
    #[error("Failed to encode image: {}\n  Reason: {reason}", path.display())]
    FailedToEncodeImage {
        /// Target image path.
        path: PathBuf,
        /// Encoder message.
        reason: String,
    },

    /// Output file could not be created.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Output file could not be written.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Merge folder holds no file of the requested format.
    #[error("No *.{extension} files to merge in {}", folder.display())]
    NoFilesToMerge {
        /// Folder that was scanned.
        folder: PathBuf,
        /// Extension that was matched.
        extension: String,
    },

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Building a single-page document failed.
    #[error("Failed to split page {page}: {reason}")]
    SplitFailed {
        /// 1-based page number.
        page: u32,
        /// Description of what went wrong.
        reason: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfPagesError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<image::ImageError> for PdfPagesError {
    fn from(err: image::ImageError) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfPagesError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<PdfPagesError>() {
            Ok(err) => err,
            Err(err) => Self::invalid_config(err.to_string()),
        }
    }
}

impl PdfPagesError {
    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a FailedToLoadImage error.
    pub fn failed_to_load_image(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadImage {
            path,
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error.
    pub fn render_failed(page: u32, reason: impl Into<String>) -> Self {
        Self::RenderFailed {
            page,
            reason: reason.into(),
        }
    }

    /// Create a SplitFailed error.
    pub fn split_failed(page: u32, reason: impl Into<String>) -> Self {
        Self::SplitFailed {
            page,
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceNotFound { .. }
            | Self::NotAFile { .. }
            | Self::FolderNotFound { .. }
            | Self::NotADirectory { .. }
            | Self::MissingFolder
            | Self::InvalidPageRange { .. }
            | Self::PageOutOfRange { .. }
            | Self::InvalidConfig { .. } => ErrorKind::Validation,
            _ => ErrorKind::Operation,
        }
    }

    /// Whether this error was raised before any work started.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
