//! Serializing merged documents.
//!
//! The merged document never touches the filesystem on the server side: it is
//! written into an in-memory buffer that becomes the response body.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::PdfWriter;
//! use lopdf::Document;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let (bytes, stats) = writer.to_bytes(doc).await?;
//! println!("Wrote {} in {:?}", stats.format_size(), stats.write_time);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::CompressionLevel;
use crate::error::{MergeError, Result};
use crate::utils::format_file_size;

/// Options for serializing PDF documents.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Compress streams before writing.
    pub compress: bool,

    /// Renumber objects into a dense sequence before writing.
    pub optimize: bool,

    /// Initial capacity of the output buffer (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::from(CompressionLevel::default())
    }
}

impl From<CompressionLevel> for WriteOptions {
    fn from(level: CompressionLevel) -> Self {
        let (compress, optimize) = match level {
            CompressionLevel::None => (false, false),
            CompressionLevel::Standard => (true, false),
            CompressionLevel::Maximum => (true, true),
        };

        Self {
            compress,
            optimize,
            buffer_size: 64 * 1024,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to serialize the document.
    pub write_time: Duration,

    /// Size of the serialized document in bytes.
    pub size: u64,

    /// Whether compression was applied.
    pub compressed: bool,

    /// Whether objects were renumbered.
    pub optimized: bool,
}

impl WriteStatistics {
    /// Format output size as human-readable string.
    pub fn format_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// PDF serializer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer for a compression level.
    pub fn with_compression(level: CompressionLevel) -> Self {
        Self::with_options(WriteOptions::from(level))
    }

    /// Serialize a document on the current thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written, e.g. because it
    /// has no trailer root.
    pub fn serialize(&self, doc: &mut Document) -> Result<(Vec<u8>, WriteStatistics)> {
        let start = Instant::now();

        if self.options.compress {
            doc.compress();
        }

        if self.options.optimize {
            doc.renumber_objects();
        }

        let mut buffer = Vec::with_capacity(self.options.buffer_size);
        doc.save_to(&mut buffer)
            .map_err(|e| MergeError::FailedToSerialize {
                reason: e.to_string(),
            })?;

        let stats = WriteStatistics {
            write_time: start.elapsed(),
            size: buffer.len() as u64,
            compressed: self.options.compress,
            optimized: self.options.optimize,
        };

        Ok((buffer, stats))
    }

    /// Serialize a document on the blocking thread pool.
    pub async fn to_bytes(&self, doc: Document) -> Result<(Vec<u8>, WriteStatistics)> {
        let writer = self.clone();
        task::spawn_blocking(move || {
            let mut doc = doc;
            writer.serialize(&mut doc)
        })
        .await?
    }
}
