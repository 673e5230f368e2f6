//! Request handlers.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tracing::debug;

use crate::error::{MergeError, Result};
use crate::io::Upload;
use crate::merge::merge_uploads;
use crate::server::AppState;
use crate::server::response::pdf_attachment;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// Merge every uploaded document into one PDF download.
pub async fn merge_pdfs(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    let multipart = multipart.map_err(|rejection| MergeError::upload_failed(rejection.body_text()))?;

    let uploads = collect_uploads(multipart, &state.config.field_name).await?;
    let merged = merge_uploads(&uploads, &state.options).await?;

    Ok(pdf_attachment(merged.bytes))
}

/// Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: crate::NAME,
        version: crate::VERSION,
    })
}

/// Minimal upload form.
pub async fn upload_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(state.upload_page.to_string())
}

/// Read all parts sent under `field_name`, in submission order.
async fn collect_uploads(mut multipart: Multipart, field_name: &str) -> Result<Vec<Upload>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MergeError::upload_failed(e.body_text()))?
    {
        if field.name() != Some(field_name) {
            debug!(field = ?field.name(), "ignoring multipart field");
            continue;
        }

        let name = field.file_name().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| MergeError::upload_failed(e.body_text()))?;

        uploads.push(Upload::new(name, bytes));
    }

    debug!(count = uploads.len(), "collected uploads");
    Ok(uploads)
}
