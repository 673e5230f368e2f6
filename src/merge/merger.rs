//! Core PDF merging implementation.
//!
//! The merged document is built from scratch: every input is renumbered into
//! its own id range, its objects are moved over, and its pages are hung under
//! one fresh page tree root in input order.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{MIN_MERGE_INPUTS, MergeError, Result};
use crate::io::LoadedPdf;
use crate::merge::pages::PageExtractor;
use crate::utils::format_file_size;

/// Lowest PDF version written for merged output.
const MIN_OUTPUT_VERSION: &str = "1.4";

/// Statistics about a merge operation.
#[derive(Debug, Clone, Default)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total size of the uploads.
    pub input_size: u64,

    /// Size of the serialized output.
    pub output_size: u64,

    /// Time taken to parse all uploads.
    pub load_time: Duration,

    /// Time taken to build the merged document.
    pub merge_time: Duration,

    /// Inherited page attributes copied onto pages.
    pub inherited_attributes: usize,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    /// Page extractor for page tree operations.
    page_extractor: PageExtractor,
}

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self {
            page_extractor: PageExtractor::new(),
        }
    }

    /// Merge loaded documents in the order given.
    ///
    /// The output holds every page of the first input in its original order,
    /// followed by every page of the second input, and so on.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two documents are given
    /// - A page object cannot be read or updated
    pub fn merge(&self, inputs: Vec<LoadedPdf>) -> Result<MergeResult> {
        if inputs.len() < MIN_MERGE_INPUTS {
            return Err(MergeError::insufficient_input(inputs.len()));
        }

        let start = Instant::now();
        let files_merged = inputs.len();
        let input_size = inputs.iter().map(|pdf| pdf.size).sum();

        let mut merged = Document::with_version(output_version(&inputs));
        let mut next_id = 1;
        let mut page_ids: Vec<ObjectId> = Vec::new();
        let mut inherited_attributes = 0;

        for loaded in inputs {
            let mut doc = loaded.document;

            // Pages are about to leave their tree; keep what they inherit
            inherited_attributes += self.page_extractor.flatten_all(&mut doc)?;

            doc.renumber_objects_with(next_id);
            next_id = doc.max_id + 1;

            let doc_pages = self.page_extractor.page_ids(&doc);
            debug!(
                index = loaded.index,
                name = %loaded.name,
                pages = doc_pages.len(),
                "appending pages"
            );

            page_ids.extend(doc_pages);
            merged.objects.extend(doc.objects);
        }

        merged.max_id = next_id - 1;

        let pages_id = merged.new_object_id();
        let catalog_id = merged.new_object_id();

        self.page_extractor
            .reparent(&mut merged, &page_ids, pages_id)?;

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(page_ids.len() as i64));
        pages.set(
            "Kids",
            Object::Array(page_ids.iter().map(|&id| Object::Reference(id)).collect()),
        );

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));

        merged.objects.insert(pages_id, Object::Dictionary(pages));
        merged.objects.insert(catalog_id, Object::Dictionary(catalog));
        merged.trailer.set("Root", Object::Reference(catalog_id));

        // Source catalogs and page tree nodes are no longer reachable
        let pruned = merged.prune_objects();
        debug!(pruned = pruned.len(), "dropped unreachable objects");

        let statistics = MergeStatistics {
            files_merged,
            total_pages: page_ids.len(),
            input_size,
            merge_time: start.elapsed(),
            inherited_attributes,
            ..Default::default()
        };

        Ok(MergeResult {
            document: merged,
            statistics,
        })
    }
}

/// Highest PDF version among the inputs, never below [`MIN_OUTPUT_VERSION`].
fn output_version(inputs: &[LoadedPdf]) -> String {
    inputs
        .iter()
        .map(|pdf| pdf.document.version.as_str())
        .fold(MIN_OUTPUT_VERSION, |highest, version| {
            if version > highest { version } else { highest }
        })
        .to_string()
}
