//! File naming and folder scanning helpers.
//!
//! Extraction writes `page_<n>.<ext>` files into a directory named after the
//! source document; merging picks those files back up with a glob and writes
//! `<folder stem>_merged.pdf`. Both sides of that contract live here.

use crate::config::{PageFormat, SortOrder};
use crate::{PdfPagesError, Result};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Stem used when a path has no usable name component.
const FALLBACK_STEM: &str = "pdfpages";

/// File name of an extracted page: `page_<n>.<ext>`.
///
/// `page` is the 1-based number of the page in the source document.
///
/// # Examples
///
/// ```
/// use pdfpages::config::PageFormat;
/// use pdfpages::paths::page_file_name;
///
/// assert_eq!(page_file_name(3, PageFormat::Image), "page_3.png");
/// assert_eq!(page_file_name(12, PageFormat::Pdf), "page_12.pdf");
/// ```
pub fn page_file_name(page: u32, format: PageFormat) -> String {
    format!("page_{page}.{}", format.extension())
}

/// Directory that receives the pages of `source`: `<root>/<source stem>`.
pub fn extraction_dir(root: &Path, source: &Path) -> PathBuf {
    root.join(stem_of(source))
}

/// Default merge output for `folder`: `<root>/<folder stem>_merged.pdf`.
pub fn merged_output_path(root: &Path, folder: &Path, format: PageFormat) -> PathBuf {
    root.join(format!(
        "{}_merged.{}",
        stem_of(folder),
        format.merged_extension()
    ))
}

/// Final path component without its extension.
///
/// Paths such as `.` or `..` have no stem of their own; the canonical path is
/// consulted for those.
fn stem_of(path: &Path) -> String {
    if let Some(stem) = path.file_stem() {
        return stem.to_string_lossy().into_owned();
    }

    fs::canonicalize(path)
        .ok()
        .and_then(|canonical| {
            canonical
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| FALLBACK_STEM.to_string())
}

/// Create `path` and any missing parents.
///
/// An existing directory is not an error.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| PdfPagesError::FailedToCreateDirectory {
        path: path.to_path_buf(),
        source,
    })
}

/// List the regular files directly inside `folder` whose extension matches
/// `format`, sorted by file name.
///
/// Subdirectories are not descended into. The extension match is
/// case-sensitive, so `PAGE.PNG` is not picked up for [`PageFormat::Image`].
///
/// # Errors
///
/// Returns an error if the glob pattern cannot be built or an entry cannot
/// be read.
pub fn collect_files(folder: &Path, format: PageFormat, order: SortOrder) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&folder.to_string_lossy());
    let pattern = format!("{escaped}/*.{}", format.extension());

    let entries = glob::glob(&pattern).map_err(|err| PdfPagesError::Other {
        message: err.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| PdfPagesError::Other {
            message: err.to_string(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    sort_files(&mut files, order);
    Ok(files)
}

/// Sort paths by file name using `order`.
pub fn sort_files(files: &mut [PathBuf], order: SortOrder) {
    files.sort_by(|a, b| {
        let a_name = file_name_of(a);
        let b_name = file_name_of(b);
        match order {
            SortOrder::Lexical => a_name.cmp(&b_name),
            SortOrder::Numeric => natural_cmp(&a_name, &b_name),
        }
    });
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Compare two strings so that runs of digits compare by numeric value.
///
/// Falls back to plain comparison when the strings are otherwise equal, so
/// `page_02` and `page_2` still have a stable order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_digits = take_digits(&mut left);
                let r_digits = take_digits(&mut right);
                let ordering = compare_digit_runs(&l_digits, &r_digits);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

// Compares by value without parsing, so arbitrarily long runs cannot overflow.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
