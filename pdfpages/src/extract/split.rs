//! Single-page document construction.
//!
//! A page is cut out of its document by cloning the document, pointing the
//! root page tree at that page alone and pruning whatever became
//! unreachable. Attributes the page inherited from intermediate page tree
//! nodes are copied onto the page first so it renders the same on its own.

use crate::error::{PdfPagesError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Page attributes that may be inherited from ancestor `Pages` nodes.
pub const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

// Guards against cyclic Parent chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// Builds single-page documents out of a multi-page one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSplitter;

impl PageSplitter {
    /// Create a new page splitter.
    pub fn new() -> Self {
        Self
    }

    /// Build a document containing only page `page` (1-based) of `doc`.
    ///
    /// The source document is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::SplitFailed`] if the page does not exist or
    /// the page tree is malformed.
    pub fn split_page(&self, doc: &Document, page: u32) -> Result<Document> {
        let page_id = doc
            .get_pages()
            .get(&page)
            .copied()
            .ok_or_else(|| PdfPagesError::split_failed(page, "page does not exist"))?;

        let inherited = inherited_attributes(doc, page_id, page)?;

        let mut single = doc.clone();
        let root_pages_id = root_pages_id(&single, page)?;

        let page_dict = single
            .get_dictionary_mut(page_id)
            .map_err(|e| PdfPagesError::split_failed(page, format!("page object: {e}")))?;
        for (key, value) in inherited {
            page_dict.set(key, value);
        }
        page_dict.set("Parent", Object::Reference(root_pages_id));

        let root_pages = single
            .get_dictionary_mut(root_pages_id)
            .map_err(|e| PdfPagesError::split_failed(page, format!("page tree root: {e}")))?;
        root_pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        root_pages.set("Count", Object::Integer(1));
        root_pages.remove(b"Parent");

        // Outlines, named destinations and forms would keep other pages alive.
        let catalog = single
            .catalog_mut()
            .map_err(|e| PdfPagesError::split_failed(page, format!("catalog: {e}")))?;
        let mut trimmed = Dictionary::new();
        trimmed.set("Type", Object::Name(b"Catalog".to_vec()));
        trimmed.set("Pages", Object::Reference(root_pages_id));
        *catalog = trimmed;

        let removed = single.prune_objects();
        log::debug!("page {page}: pruned {} unreachable object(s)", removed.len());

        Ok(single)
    }

    /// Get the number of pages in a document.
    pub fn page_count(&self, doc: &Document) -> u32 {
        doc.get_pages().len() as u32
    }
}

/// Object id of the root `Pages` node referenced by the catalog.
fn root_pages_id(doc: &Document, page: u32) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfPagesError::split_failed(page, format!("page tree root: {e}")))
}

/// Inheritable attributes the page lacks, resolved from its ancestors.
///
/// The nearest ancestor defining an attribute wins.
fn inherited_attributes(
    doc: &Document,
    page_id: ObjectId,
    page: u32,
) -> Result<Vec<(Vec<u8>, Object)>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| PdfPagesError::split_failed(page, format!("page object: {e}")))?;

    let mut missing: Vec<&[u8]> = INHERITABLE_ATTRIBUTES
        .iter()
        .copied()
        .filter(|key| !page_dict.has(key))
        .collect();
    let mut found = Vec::new();

    let mut parent = page_dict.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(node_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    Ok(found)
}
