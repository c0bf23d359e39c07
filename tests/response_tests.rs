//! Binary, stream, base64 and download shaping.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use courier::{Error, RequestConfig, ResponseType};
use futures::TryStreamExt;

mod common;
use common::helpers::*;
use common::server::{self, IMAGE_BYTES};

#[tokio::test]
async fn test_get_buffer() {
    let client = create_test_client(&server::spawn().await);

    let buffer = client.get_buffer("/image.png", None).await.unwrap();
    assert_eq!(buffer, Bytes::from_static(IMAGE_BYTES));
}

#[tokio::test]
async fn test_get_buffer_forces_response_type() {
    let client = create_test_client(&server::spawn().await);

    let config = RequestConfig::new().response_type(ResponseType::Json);
    let buffer = client.get_buffer("/image.png", Some(config)).await.unwrap();
    assert_eq!(buffer.as_ref(), IMAGE_BYTES);
}

#[tokio::test]
async fn test_get_stream_matches_buffer() {
    let client = create_test_client(&server::spawn().await);

    let buffer = client.get_buffer("/image.png", None).await.unwrap();
    let chunks: Vec<Bytes> = client
        .get_stream("/image.png", None)
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(chunks.concat(), buffer.to_vec());
}

#[tokio::test]
async fn test_get_base64_round_trips_to_buffer() {
    let client = create_test_client(&server::spawn().await);

    let encoded = client.get_base64("/image.png", None).await.unwrap();
    let buffer = client.get_buffer("/image.png", None).await.unwrap();

    assert_eq!(STANDARD.decode(encoded).unwrap(), buffer.to_vec());
}

#[tokio::test]
async fn test_get_and_download() {
    let client = create_test_client(&server::spawn().await);
    let temp_dir = create_temp_dir();
    let target = temp_file_path(temp_dir.path(), "temp.png");

    let path = client.get_and_download("/image.png", &target, None).await.unwrap();

    assert_eq!(path, target);
    assert_eq!(std::fs::read(&path).unwrap(), IMAGE_BYTES);
}

#[tokio::test]
async fn test_get_and_download_overwrites_existing_file() {
    let client = create_test_client(&server::spawn().await);
    let temp_dir = create_temp_dir();
    let target = temp_file_path(temp_dir.path(), "temp.png");
    std::fs::write(&target, b"stale content that is longer than the image").unwrap();

    client.get_and_download("/image.png", &target, None).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), IMAGE_BYTES);
}

#[tokio::test]
async fn test_get_and_download_missing_directory() {
    let client = create_test_client(&server::spawn().await);
    let temp_dir = create_temp_dir();
    let target = temp_dir.path().join("nope").join("temp.png");

    let err = client.get_and_download("/image.png", &target, None).await.unwrap_err();
    assert!(err.is_filesystem());
    assert!(matches!(err, Error::PathNotFound(_)));
    assert!(!target.exists());
}

#[tokio::test]
async fn test_get_and_download_failed_request_writes_nothing() {
    let client = create_test_client(&server::spawn().await);
    let temp_dir = create_temp_dir();
    let target = temp_file_path(temp_dir.path(), "temp.png");

    let err = client.get_and_download("/missing", &target, None).await.unwrap_err();
    assert!(err.is_transport());
    assert!(!target.exists());
}

#[tokio::test]
async fn test_get_and_download_failed_write_is_filesystem_error() {
    let client = create_test_client(&server::spawn().await);
    let temp_dir = create_temp_dir();

    // The parent directory exists, so the request is sent; writing over a
    // directory then fails.
    let err = client
        .get_and_download("/image.png", temp_dir.path(), None)
        .await
        .unwrap_err();

    assert!(err.is_filesystem());
    assert!(matches!(err, Error::IOError { .. }));
    assert!(temp_dir.path().is_dir());
}
