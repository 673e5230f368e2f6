//! Upload client state machine.
//!
//! [`UploadState`] holds everything the client knows: the current selection,
//! the last merged result and whether a request is in flight. Transitions
//! never perform I/O; the caller sends the request between
//! [`UploadState::begin_merge`] and [`UploadState::finish`].

use std::fmt;

use crate::config::MERGED_FILE_NAME;
use crate::error::{MIN_MERGE_INPUTS, MergeError, PROCESSING_FAILURE_MESSAGE};
use crate::utils::is_pdf_path;

/// A file picked for merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name sent with the upload.
    pub name: String,

    /// File content.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Create a selected file.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A merged document ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedDownload {
    /// Merged PDF content.
    pub bytes: Vec<u8>,

    /// Suggested file name.
    pub file_name: &'static str,
}

/// What came back from the merge server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// 2xx response with the merged document.
    Success(Vec<u8>),

    /// Any other status.
    Failed {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The request did not complete.
    TransportError(String),
}

/// Something the user needs to be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Merge triggered with too few files selected.
    TooFewFiles {
        /// Number of files selected.
        selected: usize,
    },

    /// Merge triggered while a request is already running.
    InProgress,

    /// The server answered with a non-OK status.
    MergeFailed {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The request could not be sent or its response could not be read.
    RequestError {
        /// Transport error description.
        reason: String,
    },
}

impl Notice {
    /// Text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::TooFewFiles { .. } => "Please select at least two PDF files to merge.",
            Self::InProgress => "A merge is already in progress.",
            Self::MergeFailed { .. } => "Failed to merge PDFs.",
            Self::RequestError { .. } => PROCESSING_FAILURE_MESSAGE,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<Notice> for MergeError {
    fn from(notice: Notice) -> Self {
        let message = notice.message();
        match notice {
            Notice::TooFewFiles { selected } => MergeError::insufficient_input(selected),
            Notice::InProgress => MergeError::invalid_config(message),
            Notice::MergeFailed { status, body } => MergeError::ServerRejected { status, body },
            Notice::RequestError { reason } => MergeError::TransportFailed { reason },
        }
    }
}

/// Client state: selection, merged result and in-flight flag.
#[derive(Debug, Default)]
pub struct UploadState {
    selected: Vec<SelectedFile>,
    merged: Option<MergedDownload>,
    in_flight: bool,
}

impl UploadState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection.
    ///
    /// Files without a `.pdf` extension are left out; their names are
    /// returned. Nothing is submitted.
    pub fn select_files(&mut self, files: Vec<SelectedFile>) -> Vec<String> {
        let (accepted, rejected): (Vec<_>, Vec<_>) =
            files.into_iter().partition(|file| is_pdf_path(&file.name));

        self.selected = accepted;
        rejected.into_iter().map(|file| file.name).collect()
    }

    /// Whether the merge action is available.
    pub fn can_merge(&self) -> bool {
        self.selected.len() >= MIN_MERGE_INPUTS && !self.in_flight
    }

    /// Start a merge.
    ///
    /// On success the in-flight flag is set and the files to submit are
    /// returned. With fewer than two files nothing changes and the user is
    /// to be notified; no request may be sent.
    pub fn begin_merge(&mut self) -> Result<&[SelectedFile], Notice> {
        if self.in_flight {
            return Err(Notice::InProgress);
        }

        if self.selected.len() < MIN_MERGE_INPUTS {
            return Err(Notice::TooFewFiles {
                selected: self.selected.len(),
            });
        }

        self.in_flight = true;
        Ok(&self.selected)
    }

    /// Record the server's answer and clear the in-flight flag.
    ///
    /// A failure drops any earlier merged result.
    pub fn finish(&mut self, outcome: MergeOutcome) -> Result<&MergedDownload, Notice> {
        self.in_flight = false;

        match outcome {
            MergeOutcome::Success(bytes) => Ok(self.merged.insert(MergedDownload {
                bytes,
                file_name: MERGED_FILE_NAME,
            })),
            MergeOutcome::Failed { status, body } => {
                self.merged = None;
                Err(Notice::MergeFailed { status, body })
            }
            MergeOutcome::TransportError(reason) => {
                self.merged = None;
                Err(Notice::RequestError { reason })
            }
        }
    }

    /// Files currently selected, in merge order.
    pub fn selected(&self) -> &[SelectedFile] {
        &self.selected
    }

    /// The last merged document, if any.
    pub fn merged(&self) -> Option<&MergedDownload> {
        self.merged.as_ref()
    }

    /// Whether a request is running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
