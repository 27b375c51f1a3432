//! Integration tests for the file downloader.

use openintel_dl::{DownloadError, DownloadOutcome, FileDownloader};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_download_writes_file_named_after_url_segment() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("temp dir");
    let content = b"col1,col2\n1,2\n";

    Mock::given(method("GET"))
        .and(path("/data/part-00000.gz.parquet"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(&server)
        .await;

    let downloader = FileDownloader::new();
    let url = format!("{}/data/part-00000.gz.parquet", server.uri());
    let outcome = downloader
        .download(&url, temp_dir.path())
        .await
        .expect("download should succeed");

    let expected = temp_dir.path().join("part-00000.gz.parquet");
    assert_eq!(outcome, DownloadOutcome::Downloaded(expected.clone()));
    assert_eq!(std::fs::read(&expected).expect("read file"), content);
}

#[tokio::test]
async fn test_download_skips_when_destination_exists() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("temp dir");

    Mock::given(method("GET"))
        .and(path("/data/existing.parquet"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"remote".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let destination = temp_dir.path().join("existing.parquet");
    std::fs::write(&destination, b"local").expect("seed file");

    let downloader = FileDownloader::new();
    let url = format!("{}/data/existing.parquet", server.uri());
    let outcome = downloader
        .download(&url, temp_dir.path())
        .await
        .expect("skip is a success");

    assert_eq!(outcome, DownloadOutcome::Skipped(destination.clone()));
    assert_eq!(std::fs::read(&destination).expect("read file"), b"local");
}

#[tokio::test]
async fn test_download_404_yields_http_status_error_and_no_file() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("temp dir");

    let downloader = FileDownloader::new();
    let url = format!("{}/missing.parquet", server.uri());
    let result = downloader.download(&url, temp_dir.path()).await;

    assert!(matches!(
        result,
        Err(DownloadError::HttpStatus { status: 404, .. })
    ));
    assert!(
        !temp_dir.path().join("missing.parquet").exists(),
        "no file must be created for an error response"
    );
}

#[tokio::test]
async fn test_download_strips_query_from_destination_name() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("temp dir");

    Mock::given(method("GET"))
        .and(path("/signed/file.parquet"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"signed".to_vec()))
        .mount(&server)
        .await;

    let downloader = FileDownloader::new();
    let url = format!("{}/signed/file.parquet?sig=abc123", server.uri());
    downloader
        .download(&url, temp_dir.path())
        .await
        .expect("download should succeed");

    assert!(temp_dir.path().join("file.parquet").exists());
}

#[tokio::test]
async fn test_download_to_missing_directory_is_io_error() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("temp dir");
    let missing_dir = temp_dir.path().join("does-not-exist");

    Mock::given(method("GET"))
        .and(path("/data.parquet"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bytes".to_vec()))
        .mount(&server)
        .await;

    let downloader = FileDownloader::new();
    let url = format!("{}/data.parquet", server.uri());
    let result = downloader.download(&url, &missing_dir).await;

    assert!(matches!(result, Err(DownloadError::Io { .. })));
}

#[tokio::test]
async fn test_download_empty_body_creates_empty_file() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("temp dir");

    Mock::given(method("GET"))
        .and(path("/empty.parquet"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let downloader = FileDownloader::new();
    let url = format!("{}/empty.parquet", server.uri());
    let outcome = downloader
        .download(&url, temp_dir.path())
        .await
        .expect("download should succeed");

    let destination = temp_dir.path().join("empty.parquet");
    assert_eq!(outcome, DownloadOutcome::Downloaded(destination.clone()));
    assert_eq!(std::fs::metadata(&destination).expect("metadata").len(), 0);
}
