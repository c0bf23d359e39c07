//! Adapter with explicit create/redeploy hooks.

use super::slot::InstanceSlot;
use super::{ClientAdapter, ClientProvider};
use crate::http::HttpClientConfig;
use crate::{HttpClient, Result};

use std::sync::Arc;
use tracing::info;

/// Starts empty; [`create`](ClientAdapter::create) or
/// [`redeploy`](ClientAdapter::redeploy) install a client.
///
/// Replacing the instance never waits for requests issued against the old
/// one; they finish on the `Arc` they captured.
#[derive(Debug, Default)]
pub struct HttpClientAdapter {
    slot: InstanceSlot<HttpClient>,
}

impl HttpClientAdapter {
    /// An adapter with no instance yet.
    pub fn new() -> Self {
        HttpClientAdapter::default()
    }

    /// An adapter with an instance built from `config`.
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let adapter = Self::new();
        adapter.create(config)?;
        Ok(adapter)
    }

    /// Whether an instance is currently installed.
    pub fn is_active(&self) -> bool {
        self.slot.is_occupied()
    }

    fn install(&self, config: HttpClientConfig) -> Result<(Arc<HttpClient>, bool)> {
        let client = Arc::new(HttpClient::new(config)?);
        let replaced = self.slot.replace(Arc::clone(&client)).is_some();
        Ok((client, replaced))
    }
}

impl ClientProvider<HttpClient> for HttpClientAdapter {
    fn get_instance(&self) -> Option<Arc<HttpClient>> {
        self.slot.load()
    }

    fn close(&self) {
        if self.slot.take().is_some() {
            info!("HTTP client adapter closed");
        }
    }
}

impl ClientAdapter<HttpClient, HttpClientConfig> for HttpClientAdapter {
    fn create(&self, config: HttpClientConfig) -> Result<Arc<HttpClient>> {
        let (client, replaced) = self.install(config)?;
        info!(replaced, "HTTP client adapter created instance");
        Ok(client)
    }

    fn redeploy(&self, config: HttpClientConfig) -> Result<Arc<HttpClient>> {
        let (client, replaced) = self.install(config)?;
        info!(replaced, "HTTP client adapter redeployed instance");
        Ok(client)
    }
}
