//! Folder merging.
//!
//! Files are picked up from the folder by extension, ordered by name and
//! combined into one PDF. PDF inputs keep their own page trees: each one
//! becomes a child of a new root `Pages` node after its objects are
//! renumbered past the ids already in use.

use lopdf::{Document, Object, ObjectId, dictionary};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{MergeRequest, PageFormat, SortOrder};
use crate::error::{PdfPagesError, Result};
use crate::io::{LoadedPdf, PdfReader, PdfWriter};
use crate::merge::images::ImageDocumentBuilder;
use crate::paths;
use crate::validation::Validator;

/// Outcome of a merge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    /// Folder the inputs came from.
    pub folder: PathBuf,
    /// Merged document.
    pub output: PathBuf,
    /// Format of the inputs.
    pub format: PageFormat,
    /// Inputs in merge order.
    pub inputs: Vec<PathBuf>,
    /// Pages in the merged document.
    pub total_pages: u32,
    /// Size of the merged document in bytes.
    pub output_size: u64,
    /// Time spent merging and writing.
    #[serde(skip)]
    pub merge_time: Duration,
}

impl MergeReport {
    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        crate::io::format_file_size(self.output_size)
    }
}

/// What a merge would read and write.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePlan {
    /// Folder the inputs come from.
    pub folder: PathBuf,
    /// Document that would be written.
    pub output: PathBuf,
    /// Format of the inputs.
    pub format: PageFormat,
    /// Ordering applied to the inputs.
    pub order: SortOrder,
    /// Inputs in merge order.
    pub inputs: Vec<PathBuf>,
}

/// Merges a folder of page files into one PDF.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
    writer: PdfWriter,
    images: ImageDocumentBuilder,
    validator: Validator,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the folder described by `request` into `request.output`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The folder does not exist or is not a directory
    /// - No file in the folder matches the format
    /// - Any input fails to load or decode
    /// - The output cannot be written
    ///
    /// No output file is written when an input fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfpages::merge::Merger;
    /// # use pdfpages::config::{MergeRequest, PageFormat};
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let request = MergeRequest::new("book", "book_merged.pdf", PageFormat::Pdf);
    /// let report = Merger::new().merge(&request)?;
    /// println!("Merged {} files into {} pages", report.inputs.len(), report.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, request: &MergeRequest) -> Result<MergeReport> {
        let start = Instant::now();
        let inputs = self.collect_inputs(request)?;

        log::info!(
            "merging {} {} file(s) from {}",
            inputs.len(),
            request.format.extension(),
            request.folder.display()
        );

        let mut document = match request.format {
            PageFormat::Image => self.images.build(&inputs)?,
            PageFormat::Pdf => {
                let loaded = self.reader.load_all(&inputs)?;
                merge_documents(loaded)?
            }
        };
        let total_pages = document.get_pages().len() as u32;

        if let Some(parent) = request.output.parent()
            && !parent.as_os_str().is_empty()
        {
            paths::ensure_dir(parent)?;
        }
        let stats = self.writer.save_with_stats(&mut document, &request.output)?;

        log::info!(
            "wrote {} ({} pages, {})",
            request.output.display(),
            total_pages,
            stats.format_file_size()
        );

        Ok(MergeReport {
            folder: request.folder.clone(),
            output: request.output.clone(),
            format: request.format,
            inputs,
            total_pages,
            output_size: stats.file_size,
            merge_time: start.elapsed(),
        })
    }

    /// List the inputs [`Merger::merge`] would combine, without writing.
    ///
    /// # Errors
    ///
    /// Same folder and matching errors as [`Merger::merge`].
    pub fn plan(&self, request: &MergeRequest) -> Result<MergePlan> {
        let inputs = self.collect_inputs(request)?;
        Ok(MergePlan {
            folder: request.folder.clone(),
            output: request.output.clone(),
            format: request.format,
            order: request.order,
            inputs,
        })
    }

    fn collect_inputs(&self, request: &MergeRequest) -> Result<Vec<PathBuf>> {
        self.validator.validate_folder(&request.folder)?;

        let inputs = paths::collect_files(&request.folder, request.format, request.order)?;
        if inputs.is_empty() {
            return Err(PdfPagesError::NoFilesToMerge {
                folder: request.folder.clone(),
                extension: request.format.extension().to_string(),
            });
        }
        for input in &inputs {
            log::debug!("input {}", input.display());
        }
        Ok(inputs)
    }
}

/// Concatenate loaded documents in order.
///
/// Every input keeps its own page tree. A fresh root `Pages` node is
/// created with the inputs' roots as its kids, so attributes one input's
/// pages inherit never reach another input's pages.
///
/// # Errors
///
/// Returns [`PdfPagesError::MergeFailed`] if `loaded` is empty or a page
/// tree is malformed.
pub fn merge_documents(loaded: Vec<LoadedPdf>) -> Result<Document> {
    let mut documents = loaded.into_iter();
    let first = documents
        .next()
        .ok_or_else(|| PdfPagesError::merge_failed("no documents to merge"))?;

    let mut merged = first.document;
    let first_pages_id = root_pages_id(&merged, &first.path)?;
    let first_count = merged.get_pages().len() as i64;

    let root_id = merged.new_object_id();
    merged.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        }),
    );
    attach_tree(&mut merged, root_id, first_pages_id, first_count, &first.path)?;
    merged
        .catalog_mut()
        .map_err(|e| merge_error(&first.path, "catalog", e))?
        .set("Pages", Object::Reference(root_id));

    let mut max_id = merged.max_id;

    for loaded in documents {
        let mut doc = loaded.document;
        doc.renumber_objects_with(max_id + 1);
        max_id = max_id.max(doc.max_id);

        let catalog_id = doc
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|e| merge_error(&loaded.path, "catalog", e))?;
        let pages_id = root_pages_id(&doc, &loaded.path)?;
        let page_count = doc.get_pages().len() as i64;

        for (id, object) in doc.objects {
            if id != catalog_id {
                merged.objects.insert(id, object);
            }
        }

        attach_tree(&mut merged, root_id, pages_id, page_count, &loaded.path)?;
        log::debug!("appended {} page(s) from {}", page_count, loaded.path.display());
    }

    merged.max_id = max_id;
    Ok(merged)
}

/// Hang the page tree rooted at `child` under `root`.
fn attach_tree(
    doc: &mut Document,
    root: ObjectId,
    child: ObjectId,
    page_count: i64,
    path: &Path,
) -> Result<()> {
    doc.get_dictionary_mut(child)
        .map_err(|e| merge_error(path, "page tree", e))?
        .set("Parent", Object::Reference(root));
    graft_pages(doc, root, child, page_count)
}

/// Add `child` under `parent` and raise its page count.
fn graft_pages(doc: &mut Document, parent: ObjectId, child: ObjectId, page_count: i64) -> Result<()> {
    let pages = doc
        .get_dictionary_mut(parent)
        .map_err(|e| PdfPagesError::merge_failed(format!("Failed to get pages object: {e}")))?;

    match pages.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => kids.push(Object::Reference(child)),
        Ok(_) => return Err(PdfPagesError::merge_failed("Kids is not an array")),
        Err(_) => return Err(PdfPagesError::merge_failed("Pages dictionary missing Kids array")),
    }

    let current = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages.set("Count", Object::Integer(current + page_count));
    Ok(())
}

fn root_pages_id(doc: &Document, path: &Path) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| merge_error(path, "page tree root", e))
}

fn merge_error(path: &Path, what: &str, err: lopdf::Error) -> PdfPagesError {
    PdfPagesError::merge_failed(format!("{}: failed to get {what}: {err}", path.display()))
}
