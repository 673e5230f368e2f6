//! Error types for pdfmerge.
//!
//! Every failure of the merge pipeline falls into one of two classes:
//!
//! - **Client errors**: the caller supplied fewer than two files. The message
//!   is safe to show and explains what to do.
//! - **Processing failures**: an upload could not be read, parsed, merged or
//!   serialized. These are logged with their cause and reported to callers
//!   with a generic message only.

use std::path::PathBuf;

/// Result type alias for pdfmerge operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Minimum number of documents a merge request must carry.
pub const MIN_MERGE_INPUTS: usize = 2;

/// Message returned to callers that supplied too few files.
pub const INSUFFICIENT_INPUT_MESSAGE: &str = "Please upload at least two PDFs to merge.";

/// Message returned to callers for every processing failure.
pub const PROCESSING_FAILURE_MESSAGE: &str = "An error occurred while merging PDFs.";

/// Main error type for pdfmerge operations.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Fewer than [`MIN_MERGE_INPUTS`] documents were supplied.
    #[error("At least {} PDF files are required, received {received}", MIN_MERGE_INPUTS)]
    InsufficientInput {
        /// Number of documents actually received.
        received: usize,
    },

    /// The multipart upload could not be read.
    #[error("Failed to read upload: {reason}")]
    UploadFailed {
        /// Details about the failure.
        reason: String,
    },

    /// An uploaded document could not be parsed.
    #[error("Failed to load PDF #{index} ({name})\n  Reason: {reason}")]
    FailedToLoadPdf {
        /// Position of the document in the submission (0-based).
        index: usize,
        /// Original file name, or a placeholder when none was sent.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// An uploaded document is encrypted.
    #[error("PDF #{index} ({name}) is encrypted and cannot be merged")]
    EncryptedPdf {
        /// Position of the document in the submission (0-based).
        index: usize,
        /// Original file name, or a placeholder when none was sent.
        name: String,
    },

    /// Building the merged document failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Serializing the merged document failed.
    #[error("Failed to serialize merged PDF: {reason}")]
    FailedToSerialize {
        /// Description of what went wrong.
        reason: String,
    },

    /// A blocking worker panicked or was cancelled.
    #[error("Worker task failed: {reason}")]
    TaskFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// A client-side input path could not be used.
    #[error("Cannot use input file: {}\n  Reason: {reason}", path.display())]
    InvalidInput {
        /// Path that was rejected.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// The merge server could not be reached or its response not read.
    #[error("Request to merge server failed: {reason}")]
    TransportFailed {
        /// Transport error description.
        reason: String,
    },

    /// The merge server rejected the request.
    #[error("Merge server responded with status {status}: {body}")]
    ServerRejected {
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MergeError {
    /// Create an InsufficientInput error.
    pub fn insufficient_input(received: usize) -> Self {
        Self::InsufficientInput { received }
    }

    /// Create an UploadFailed error.
    pub fn upload_failed(reason: impl Into<String>) -> Self {
        Self::UploadFailed {
            reason: reason.into(),
        }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(
        index: usize,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::FailedToLoadPdf {
            index,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(index: usize, name: impl Into<String>) -> Self {
        Self::EncryptedPdf {
            index,
            name: name.into(),
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

    /// Check if the caller is at fault.
    ///
    /// Only an insufficient input count is a client error; everything else
    /// is a processing failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InsufficientInput { .. })
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }

    /// Message that may be shown to a remote caller.
    ///
    /// Processing failures never expose their cause.
    pub fn public_message(&self) -> &'static str {
        if self.is_client_error() {
            INSUFFICIENT_INPUT_MESSAGE
        } else {
            PROCESSING_FAILURE_MESSAGE
        }
    }
}

impl From<lopdf::Error> for MergeError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}

impl From<reqwest::Error> for MergeError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportFailed {
            reason: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for MergeError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed {
            reason: err.to_string(),
        }
    }
}
