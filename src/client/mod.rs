//! Upload client.
//!
//! Drives [`UploadState`] from the command line: read the selected files,
//! submit them to the merge server and save the download.

pub mod http;
pub mod state;

pub use http::MergeClient;
pub use state::{MergeOutcome, MergedDownload, Notice, SelectedFile, UploadState};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{MergeError, Result};
use crate::output::OutputFormatter;
use crate::utils::format_file_size;

/// Merge the configured inputs through the server and write the result.
///
/// Returns the path the merged document was written to.
///
/// # Errors
///
/// Returns an error if an input cannot be read, fewer than two PDFs are
/// selected, the server cannot be reached or rejects the request, or the
/// output cannot be written.
pub async fn run(config: &ClientConfig) -> Result<PathBuf> {
    config.validate()?;
    let formatter = OutputFormatter::from_config(config);

    let mut files = Vec::with_capacity(config.inputs.len());
    for path in &config.inputs {
        files.push(read_selected_file(path).await?);
    }

    let mut state = UploadState::new();
    for name in state.select_files(files) {
        formatter.warning(&format!("Skipping {name}: not a PDF file"));
    }

    for (index, file) in state.selected().iter().enumerate() {
        formatter.detail(
            &format!("#{}", index + 1),
            &format!("{} ({})", file.name, format_file_size(file.bytes.len() as u64)),
        );
    }

    let client = MergeClient::new(config)?;

    let outcome = match state.begin_merge() {
        Ok(selected) => {
            formatter.info(&format!(
                "Merging {} files via {}...",
                selected.len(),
                client.url()
            ));
            client.send(selected).await
        }
        Err(notice) => {
            formatter.error(notice.message());
            return Err(notice.into());
        }
    };

    let download = match state.finish(outcome) {
        Ok(download) => download,
        Err(notice) => {
            formatter.error(notice.message());
            if let Notice::MergeFailed { status, body } = &notice {
                formatter.detail("Status", &status.to_string());
                formatter.detail("Response", body);
            }
            return Err(notice.into());
        }
    };

    tokio::fs::write(&config.output, &download.bytes).await?;

    debug!(
        output = %config.output.display(),
        size = download.bytes.len(),
        "saved merged PDF"
    );
    formatter.success(&format!(
        "Saved {} ({})",
        config.output.display(),
        format_file_size(download.bytes.len() as u64)
    ));

    Ok(config.output.clone())
}

async fn read_selected_file(path: &Path) -> Result<SelectedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| MergeError::InvalidInput {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SelectedFile::new(name, bytes))
}
