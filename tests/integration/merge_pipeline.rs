//! Integration tests for the merge pipeline.

use pdfmerge::config::CompressionLevel;
use pdfmerge::error::MergeError;
use pdfmerge::io::Upload;
use pdfmerge::merge::{MergeOptions, merge_uploads};
use rstest::rstest;

use crate::common::{page_widths, pdf_bytes};

fn upload(name: &str, widths: &[i64]) -> Upload {
    Upload::new(Some(name.to_string()), pdf_bytes(widths))
}

#[tokio::test]
async fn test_page_count_is_sum_of_inputs() {
    let uploads = vec![
        upload("a.pdf", &[101, 102, 103]),
        upload("b.pdf", &[201]),
        upload("c.pdf", &[301, 302]),
    ];

    let merged = merge_uploads(&uploads, &MergeOptions::default())
        .await
        .unwrap();

    assert_eq!(merged.statistics.files_merged, 3);
    assert_eq!(merged.statistics.total_pages, 6);
    assert_eq!(page_widths(&merged.bytes).len(), 6);
}

#[tokio::test]
async fn test_pages_follow_upload_order() {
    let uploads = vec![
        upload("z.pdf", &[900, 901]),
        upload("a.pdf", &[100, 101]),
    ];

    let merged = merge_uploads(&uploads, &MergeOptions::default())
        .await
        .unwrap();

    assert_eq!(page_widths(&merged.bytes), vec![900, 901, 100, 101]);
}

#[tokio::test]
async fn test_single_page_a_then_b() {
    let uploads = vec![upload("a.pdf", &[111]), upload("b.pdf", &[222])];

    let merged = merge_uploads(&uploads, &MergeOptions::default())
        .await
        .unwrap();

    assert_eq!(page_widths(&merged.bytes), vec![111, 222]);
}

#[tokio::test]
async fn test_merge_document_with_itself() {
    let bytes = pdf_bytes(&[100, 200, 300]);
    let uploads = vec![
        Upload::new(Some("same.pdf".to_string()), bytes.clone()),
        Upload::new(Some("same.pdf".to_string()), bytes),
    ];

    let merged = merge_uploads(&uploads, &MergeOptions::default())
        .await
        .unwrap();

    assert_eq!(
        page_widths(&merged.bytes),
        vec![100, 200, 300, 100, 200, 300]
    );
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_every_compression_level_yields_valid_pdf(#[case] compression: CompressionLevel) {
    let uploads = vec![upload("a.pdf", &[111, 112]), upload("b.pdf", &[222])];
    let options = MergeOptions {
        jobs: 2,
        compression,
    };

    let merged = merge_uploads(&uploads, &options).await.unwrap();
    assert_eq!(page_widths(&merged.bytes), vec![111, 112, 222]);
}

#[tokio::test]
async fn test_parallel_parsing_keeps_order() {
    let uploads: Vec<Upload> = (0..8)
        .map(|i| upload(&format!("{i}.pdf"), &[1000 + i]))
        .collect();
    let options = MergeOptions {
        jobs: 4,
        ..Default::default()
    };

    let merged = merge_uploads(&uploads, &options).await.unwrap();
    assert_eq!(page_widths(&merged.bytes), (1000..1008).collect::<Vec<_>>());
}

#[rstest]
#[case(0)]
#[case(1)]
#[tokio::test]
async fn test_too_few_files_is_client_error(#[case] count: usize) {
    let uploads: Vec<Upload> = (0..count).map(|_| upload("a.pdf", &[100])).collect();

    let err = merge_uploads(&uploads, &MergeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::InsufficientInput { received } if received == count));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_invalid_part_fails_whole_request() {
    let uploads = vec![
        upload("a.pdf", &[100]),
        Upload::new(Some("notes.pdf".to_string()), b"just some text".to_vec()),
    ];

    let err = merge_uploads(&uploads, &MergeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::FailedToLoadPdf { index: 1, .. }));
    assert_eq!(err.status_code(), 500);
}
