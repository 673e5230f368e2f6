//! The upload client against a live server on a loopback port.

use std::path::PathBuf;

use pdfmerge::client::{MergeClient, MergeOutcome, Notice, SelectedFile, UploadState};
use pdfmerge::config::{ClientConfig, DEFAULT_FIELD_NAME, DEFAULT_MERGE_PATH, ServerConfig};
use pdfmerge::server::router;
use tokio::net::TcpListener;

use crate::common::{page_widths, pdf_bytes};

async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(ServerConfig::default());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn client_for(server: String) -> MergeClient {
    let config = ClientConfig {
        inputs: Vec::new(),
        server,
        merge_path: DEFAULT_MERGE_PATH.to_string(),
        field_name: DEFAULT_FIELD_NAME.to_string(),
        output: PathBuf::from("merged.pdf"),
        quiet: true,
        verbose: false,
    };
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    MergeClient::with_http(&config, http)
}

#[tokio::test]
async fn test_select_merge_download() {
    let client = client_for(spawn_server().await);

    let mut state = UploadState::new();
    state.select_files(vec![
        SelectedFile::new("a.pdf", pdf_bytes(&[111])),
        SelectedFile::new("b.pdf", pdf_bytes(&[222, 223])),
    ]);
    assert!(state.can_merge());

    let outcome = {
        let files = state.begin_merge().unwrap();
        client.send(files).await
    };
    assert!(matches!(outcome, MergeOutcome::Success(_)));

    let download = state.finish(outcome).unwrap();
    assert_eq!(download.file_name, "merged.pdf");
    assert_eq!(page_widths(&download.bytes), vec![111, 222, 223]);
    assert!(!state.is_in_flight());
}

#[tokio::test]
async fn test_server_failure_becomes_notice() {
    let client = client_for(spawn_server().await);

    let mut state = UploadState::new();
    state.select_files(vec![
        SelectedFile::new("a.pdf", pdf_bytes(&[111])),
        SelectedFile::new("broken.pdf", b"not a pdf".to_vec()),
    ]);

    let outcome = {
        let files = state.begin_merge().unwrap();
        client.send(files).await
    };

    let notice = state.finish(outcome).unwrap_err();
    assert!(matches!(notice, Notice::MergeFailed { status: 500, .. }));
    assert_eq!(notice.message(), "Failed to merge PDFs.");
    assert!(state.merged().is_none());
}
