//! Mapping merge results onto HTTP responses.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::config::MERGED_FILE_NAME;
use crate::error::MergeError;

/// Wrap merged bytes in a download response.
pub fn pdf_attachment(bytes: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{MERGED_FILE_NAME}\"");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

impl IntoResponse for MergeError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_client_error() {
            warn!(error = %self, "rejected merge request");
        } else {
            error!(error = %self, "error merging PDFs");
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.public_message(),
        )
            .into_response()
    }
}
