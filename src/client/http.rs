//! Sending a selection to the merge server.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::state::{MergeOutcome, SelectedFile};
use crate::config::ClientConfig;
use crate::error::Result;

/// HTTP client for the merge endpoint.
#[derive(Debug, Clone)]
pub struct MergeClient {
    http: reqwest::Client,
    url: String,
    field_name: String,
}

impl MergeClient {
    /// Create a client for the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_http(config, http))
    }

    /// Create a client around an existing `reqwest::Client`, e.g. one with
    /// custom timeouts or proxy settings.
    pub fn with_http(config: &ClientConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            url: config.merge_url(),
            field_name: config.field_name.clone(),
        }
    }

    /// Endpoint the selection is posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build the multipart body: one part per file, in order, all under the
    /// same field name.
    pub fn build_form(&self, files: &[SelectedFile]) -> Result<Form> {
        let mut form = Form::new();

        for file in files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str("application/pdf")?;
            form = form.part(self.field_name.clone(), part);
        }

        Ok(form)
    }

    /// Post the files and classify the answer.
    ///
    /// Never fails: transport problems become [`MergeOutcome::TransportError`].
    pub async fn send(&self, files: &[SelectedFile]) -> MergeOutcome {
        let form = match self.build_form(files) {
            Ok(form) => form,
            Err(err) => return MergeOutcome::TransportError(err.to_string()),
        };

        debug!(url = %self.url, files = files.len(), "posting merge request");

        let response = match self.http.post(&self.url).multipart(form).send().await {
            Ok(response) => response,
            Err(err) => return MergeOutcome::TransportError(err.to_string()),
        };

        let status = response.status();
        debug!(status = status.as_u16(), "merge server responded");

        if status.is_success() {
            match response.bytes().await {
                Ok(bytes) => MergeOutcome::Success(bytes.to_vec()),
                Err(err) => MergeOutcome::TransportError(err.to_string()),
            }
        } else {
            MergeOutcome::Failed {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }
        }
    }
}
