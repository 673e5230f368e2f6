//! Page tree operations.
//!
//! This module handles page-level work needed before pages can be moved into
//! another document:
//! - Listing pages in document order
//! - Copying inherited attributes onto the pages themselves
//! - Re-parenting pages under a new page tree root

use lopdf::{Document, Object, ObjectId};

use crate::error::{MergeError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page tree depth, guarding against `Parent` cycles.
const MAX_TREE_DEPTH: usize = 64;

/// Page extractor for moving pages between documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExtractor;

impl PageExtractor {
    /// Create a new page extractor.
    pub fn new() -> Self {
        Self
    }

    /// Get the number of pages in a document.
    pub fn page_count(&self, doc: &Document) -> usize {
        doc.get_pages().len()
    }

    /// Page object ids in page order (first page first).
    pub fn page_ids(&self, doc: &Document) -> Vec<ObjectId> {
        doc.get_pages().into_values().collect()
    }

    /// Copy inherited attributes onto every page of a document.
    ///
    /// Returns the number of attributes copied.
    ///
    /// # Errors
    ///
    /// Returns an error if a page object is not a dictionary.
    pub fn flatten_all(&self, doc: &mut Document) -> Result<usize> {
        let mut copied = 0;
        for page_id in self.page_ids(doc) {
            copied += self.flatten_inherited_attributes(doc, page_id)?;
        }
        Ok(copied)
    }

    /// Copy the attributes a page inherits from its ancestors onto the page.
    ///
    /// The nearest ancestor wins. Attributes the page already defines are
    /// left untouched.
    pub fn flatten_inherited_attributes(
        &self,
        doc: &mut Document,
        page_id: ObjectId,
    ) -> Result<usize> {
        let page = doc
            .get_dictionary(page_id)
            .map_err(|e| MergeError::merge_failed(format!("Failed to get page: {e}")))?;

        let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();

        let mut parent = page.get(b"Parent").and_then(|p| p.as_reference()).ok();
        let mut inherited: Vec<(Vec<u8>, Object)> = Vec::new();
        let mut depth = 0;

        while let Some(parent_id) = parent {
            if missing.is_empty() || depth >= MAX_TREE_DEPTH {
                break;
            }

            let Ok(node) = doc.get_dictionary(parent_id) else {
                break;
            };

            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((key.to_vec(), value.clone()));
                    false
                }
                Err(_) => true,
            });

            parent = node.get(b"Parent").and_then(|p| p.as_reference()).ok();
            depth += 1;
        }

        let copied = inherited.len();
        if copied > 0 {
            let page = doc
                .get_dictionary_mut(page_id)
                .map_err(|e| MergeError::merge_failed(format!("Failed to get page: {e}")))?;
            for (key, value) in inherited {
                page.set(key, value);
            }
        }

        Ok(copied)
    }

    /// Point every page at a new parent node.
    pub fn reparent(&self, doc: &mut Document, page_ids: &[ObjectId], parent: ObjectId) -> Result<()> {
        for &page_id in page_ids {
            let page = doc
                .get_dictionary_mut(page_id)
                .map_err(|e| MergeError::merge_failed(format!("Failed to get page: {e}")))?;
            page.set("Parent", Object::Reference(parent));
        }
        Ok(())
    }
}
