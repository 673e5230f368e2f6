//! Configuration module for pdfmerge.
//!
//! This module turns parsed CLI arguments into validated, normalized
//! configuration for the two halves of the tool:
//! - [`ServerConfig`] drives the HTTP merge endpoint
//! - [`ClientConfig`] drives the upload client

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{MergeError, Result};

/// Default address the server listens on.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Default path of the merge endpoint.
pub const DEFAULT_MERGE_PATH: &str = "/api/merge-pdfs";

/// Default multipart field name carrying the documents.
pub const DEFAULT_FIELD_NAME: &str = "pdfs";

/// File name suggested for the merged document.
pub const MERGED_FILE_NAME: &str = "merged.pdf";

/// Path of the health check endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Default request body limit, in MiB.
pub const DEFAULT_MAX_UPLOAD_MIB: usize = 50;

/// Compression level for the merged PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written as they were loaded.
    None,
    /// Compress streams that are not already compressed.
    #[default]
    Standard,
    /// Compress streams and drop unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = MergeError;

    /// Parse compression level from string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string doesn't match a valid compression level.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(MergeError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Configuration of the merge server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: SocketAddr,

    /// Path of the merge endpoint.
    pub merge_path: String,

    /// Multipart field name carrying the documents.
    pub field_name: String,

    /// Maximum accepted request body, in bytes.
    pub max_upload_bytes: usize,

    /// Number of parallel parse workers (None = auto-detect).
    pub jobs: Option<usize>,

    /// Compression applied to the merged output.
    pub compression: CompressionLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            merge_path: DEFAULT_MERGE_PATH.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MIB * 1024 * 1024,
            jobs: None,
            compression: CompressionLevel::Standard,
        }
    }
}

impl ServerConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The merge path is empty, not absolute, or taken by another route
    /// - The field name is empty
    /// - The upload limit or the job count is zero
    pub fn validate(&self) -> Result<()> {
        validate_merge_path(&self.merge_path)?;
        validate_field_name(&self.field_name)?;

        if self.merge_path == "/" || self.merge_path == HEALTH_PATH {
            return Err(MergeError::invalid_config(format!(
                "Merge path {:?} is already used by another route",
                self.merge_path
            )));
        }

        if self.max_upload_bytes == 0 {
            return Err(MergeError::invalid_config(
                "Maximum upload size must be at least 1 MiB",
            ));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(MergeError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        Ok(())
    }

    /// Get the effective number of parallel parse workers.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Configuration of the upload client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Local files to upload, in merge order.
    pub inputs: Vec<PathBuf>,

    /// Base URL of the merge server.
    pub server: String,

    /// Path of the merge endpoint.
    pub merge_path: String,

    /// Multipart field name carrying the documents.
    pub field_name: String,

    /// Where to store the merged document.
    pub output: PathBuf,

    /// Suppress non-error output.
    pub quiet: bool,

    /// Show details about each selected file.
    pub verbose: bool,
}

impl ClientConfig {
    /// Full URL of the merge endpoint.
    pub fn merge_url(&self) -> String {
        format!("{}{}", self.server.trim_end_matches('/'), self.merge_path)
    }

    /// Validate the configuration.
    ///
    /// The minimum file count is not checked here: the client state machine
    /// reports it the same way the upload page does.
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(MergeError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if !(self.server.starts_with("http://") || self.server.starts_with("https://")) {
            return Err(MergeError::invalid_config(format!(
                "Server URL must start with http:// or https://: {}",
                self.server
            )));
        }

        validate_merge_path(&self.merge_path)?;
        validate_field_name(&self.field_name)?;

        for input in &self.inputs {
            if input == &self.output {
                return Err(MergeError::invalid_config(format!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                )));
            }
        }

        Ok(())
    }
}

fn validate_merge_path(path: &str) -> Result<()> {
    if path.is_empty() || !path.starts_with('/') {
        return Err(MergeError::invalid_config(format!(
            "Merge path must start with '/': {path:?}"
        )));
    }
    Ok(())
}

fn validate_field_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MergeError::invalid_config("Field name cannot be empty"));
    }
    Ok(())
}
