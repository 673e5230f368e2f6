//! The merge pipeline.
//!
//! [`merge_uploads`] is the whole request lifecycle minus HTTP: check the
//! input count, parse every upload, concatenate the pages and serialize the
//! result. Any failure aborts the pipeline; there is no partial output.

pub mod merger;
pub mod pages;

pub use merger::{MergeResult, MergeStatistics, Merger};
pub use pages::PageExtractor;

use tokio::task;
use tracing::info;

use crate::config::{CompressionLevel, ServerConfig};
use crate::error::{MIN_MERGE_INPUTS, MergeError, Result};
use crate::io::{PdfReader, PdfWriter, Upload};

/// Tuning for a single merge.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Number of uploads parsed at the same time.
    pub jobs: usize,

    /// Compression applied to the merged output.
    pub compression: CompressionLevel,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            compression: CompressionLevel::default(),
        }
    }
}

impl From<&ServerConfig> for MergeOptions {
    fn from(config: &ServerConfig) -> Self {
        Self {
            jobs: config.effective_jobs(),
            compression: config.compression,
        }
    }
}

/// A serialized merged document.
#[derive(Debug)]
pub struct MergedPdf {
    /// The PDF file content.
    pub bytes: Vec<u8>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Merge uploads into one PDF, first upload first.
///
/// # Errors
///
/// - [`MergeError::InsufficientInput`] if fewer than two uploads are given;
///   nothing is parsed in that case
/// - a processing error if any upload fails to parse, or if merging or
///   serialization fails
pub async fn merge_uploads(uploads: &[Upload], options: &MergeOptions) -> Result<MergedPdf> {
    if uploads.len() < MIN_MERGE_INPUTS {
        return Err(MergeError::insufficient_input(uploads.len()));
    }

    let reader = PdfReader::new();
    let (loaded, load_stats) = reader.load_all(uploads, options.jobs).await?;

    let merger = Merger::new();
    let result = task::spawn_blocking(move || merger.merge(loaded)).await??;

    let writer = PdfWriter::with_compression(options.compression);
    let (bytes, write_stats) = writer.to_bytes(result.document).await?;

    let statistics = MergeStatistics {
        load_time: load_stats.total_time,
        output_size: write_stats.size,
        ..result.statistics
    };

    info!(
        files = statistics.files_merged,
        pages = statistics.total_pages,
        input = %statistics.format_input_size(),
        output = %write_stats.format_size(),
        load_ms = statistics.load_time.as_millis() as u64,
        merge_ms = statistics.merge_time.as_millis() as u64,
        "merged PDFs"
    );

    Ok(MergedPdf { bytes, statistics })
}
