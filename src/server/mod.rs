//! HTTP merge service.
//!
//! Routes:
//! - `GET /` upload page
//! - `GET /health` liveness probe
//! - `POST <merge path>` the merge endpoint
//!
//! Requests share nothing but an immutable [`AppState`].

pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{HEALTH_PATH, ServerConfig};
use crate::error::Result;
use crate::merge::MergeOptions;

const UPLOAD_PAGE_TEMPLATE: &str = include_str!("index.html");

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,

    /// Options passed to every merge.
    pub options: Arc<MergeOptions>,

    /// Rendered upload page.
    pub upload_page: Arc<str>,
}

impl AppState {
    /// Build the shared state for a configuration.
    pub fn new(config: ServerConfig) -> Self {
        let options = MergeOptions::from(&config);
        let upload_page = render_upload_page(&config);

        Self {
            config: Arc::new(config),
            options: Arc::new(options),
            upload_page: upload_page.into(),
        }
    }
}

/// Build the application router.
pub fn router(config: ServerConfig) -> Router {
    let body_limit = config.max_upload_bytes;
    let merge_path = config.merge_path.clone();

    Router::new()
        .route("/", get(handlers::upload_page))
        .route(HEALTH_PATH, get(handlers::health_check))
        .route(&merge_path, post(handlers::merge_pdfs))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config))
}

/// Run the server until Ctrl-C is received.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the listener cannot
/// be bound.
pub async fn serve(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let listener = TcpListener::bind(config.bind).await?;
    let local_addr = listener.local_addr()?;

    info!(
        addr = %local_addr,
        merge_path = %config.merge_path,
        field = %config.field_name,
        max_upload_bytes = config.max_upload_bytes,
        jobs = config.effective_jobs(),
        "merge server listening"
    );

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("merge server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}

fn render_upload_page(config: &ServerConfig) -> String {
    UPLOAD_PAGE_TEMPLATE
        .replace("{{MERGE_PATH}}", &config.merge_path)
        .replace("{{FIELD_NAME}}", &config.field_name)
}
