//! Loading uploaded PDFs.
//!
//! Uploads are parsed on the blocking thread pool. A batch may be parsed by
//! several workers at once, but results are always yielded in submission
//! order and the first failure aborts the batch.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::{PdfReader, Upload};
//!
//! # async fn example(uploads: Vec<Upload>) -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let (loaded, stats) = reader.load_all(&uploads, 4).await?;
//! println!("Loaded {} pages from {} files", stats.total_pages, loaded.len());
//! # Ok(())
//! # }
//! ```

use axum::body::Bytes;
use lopdf::Document;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::error::{MergeError, Result};

/// One uploaded file, as received.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original file name, if the sender provided one.
    pub name: Option<String>,

    /// Raw file content.
    pub bytes: Bytes,
}

impl Upload {
    /// Create an upload from a name and its content.
    pub fn new(name: Option<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name,
            bytes: bytes.into(),
        }
    }

    /// Name used in logs and errors.
    ///
    /// Falls back to the 1-based position when the sender gave no file name.
    pub fn display_name(&self, index: usize) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("upload #{}", index + 1),
        }
    }

    /// Size of the upload in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A parsed upload.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Position of the upload in the submission (0-based).
    pub index: usize,

    /// Name used in logs and errors.
    pub name: String,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to parse the document.
    pub load_time: Duration,

    /// Upload size in bytes.
    pub size: u64,
}

/// Statistics for a batch load.
#[derive(Debug, Clone, Default)]
pub struct LoadStatistics {
    /// Number of documents loaded.
    pub files_loaded: usize,

    /// Wall-clock time for the whole batch.
    pub total_time: Duration,

    /// Total size of the uploads.
    pub total_size: u64,

    /// Total number of pages loaded.
    pub total_pages: usize,
}

impl LoadStatistics {
    fn from_loaded(loaded: &[LoadedPdf], total_time: Duration) -> Self {
        Self {
            files_loaded: loaded.len(),
            total_time,
            total_size: loaded.iter().map(|pdf| pdf.size).sum(),
            total_pages: loaded.iter().map(|pdf| pdf.page_count).sum(),
        }
    }
}

/// Parser for uploaded PDF documents.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Parse a single upload on the current thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a PDF the library can load, or
    /// if the document is encrypted.
    pub fn parse(&self, index: usize, upload: &Upload) -> Result<LoadedPdf> {
        let name = upload.display_name(index);
        let start = Instant::now();

        let document = Document::load_mem(&upload.bytes)
            .map_err(|e| MergeError::failed_to_load_pdf(index, name.clone(), e.to_string()))?;

        if document.is_encrypted() {
            return Err(MergeError::encrypted_pdf(index, name));
        }

        let page_count = document.get_pages().len();
        let load_time = start.elapsed();

        debug!(
            index,
            name = %name,
            pages = page_count,
            version = %document.version,
            elapsed_ms = load_time.as_millis() as u64,
            "parsed upload"
        );

        Ok(LoadedPdf {
            document,
            index,
            name,
            page_count,
            load_time,
            size: upload.size(),
        })
    }

    /// Parse a single upload on the blocking thread pool.
    pub async fn load(&self, index: usize, upload: Upload) -> Result<LoadedPdf> {
        let reader = self.clone();
        task::spawn_blocking(move || reader.parse(index, &upload)).await?
    }

    /// Parse every upload, keeping submission order.
    ///
    /// Up to `workers` documents are parsed at the same time. Loading stops
    /// at the first failure in submission order.
    ///
    /// # Errors
    ///
    /// Returns the error of the first upload that fails to parse.
    pub async fn load_all(
        &self,
        uploads: &[Upload],
        workers: usize,
    ) -> Result<(Vec<LoadedPdf>, LoadStatistics)> {
        use futures::stream::{self, StreamExt, TryStreamExt};

        let start = Instant::now();
        let workers = workers.max(1);

        let tasks = uploads.iter().cloned().enumerate().map(|(index, upload)| {
            let reader = self.clone();
            async move { reader.load(index, upload).await }
        });

        // `buffered` yields in input order, unlike `buffer_unordered`
        let loaded: Vec<LoadedPdf> = stream::iter(tasks)
            .buffered(workers)
            .try_collect()
            .await?;

        let stats = LoadStatistics::from_loaded(&loaded, start.elapsed());
        Ok((loaded, stats))
    }
}
