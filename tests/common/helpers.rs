use courier::provider::{ClientProvider, HttpClientProvider};
use courier::{HttpClient, HttpClientConfig};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

pub const TEST_NAME: &str = "chogath";

/// Installs a test subscriber once; `RUST_LOG=courier=debug` shows request logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Path of a file inside `dir`
pub fn temp_file_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(filename)
}

/// Construction config pointed at the local echo server, keep-alive enabled
pub fn create_test_config(base_url: &Url) -> HttpClientConfig {
    HttpClientConfig {
        base_url: Some(base_url.clone()),
        pool_idle_timeout: Some(Duration::from_secs(15)),
        timeout: Some(Duration::from_secs(15)),
        ..HttpClientConfig::default()
    }
}

/// Provider in the Active state for the local echo server
pub fn create_test_provider(base_url: &Url) -> HttpClientProvider {
    HttpClientProvider::new(create_test_config(base_url)).expect("Failed to create provider")
}

/// Client handed out by a fresh provider
pub fn create_test_client(base_url: &Url) -> Arc<HttpClient> {
    create_test_provider(base_url)
        .get_instance()
        .expect("Provider should hold an instance")
}
