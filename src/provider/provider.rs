//! Provider that is active from construction.

use super::slot::InstanceSlot;
use super::ClientProvider;
use crate::http::HttpClientConfig;
use crate::{HttpClient, Result};

use std::sync::Arc;
use tracing::info;

/// Owns one [`HttpClient`], built when the provider is.
///
/// ```rust
/// use courier::provider::{ClientProvider, HttpClientProvider};
/// use courier::HttpClientConfig;
///
/// # fn example() -> Result<(), courier::Error> {
/// let provider = HttpClientProvider::new(HttpClientConfig::default())?;
/// assert!(provider.get_instance().is_some());
///
/// provider.close();
/// assert!(provider.get_instance().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct HttpClientProvider {
    slot: InstanceSlot<HttpClient>,
}

impl HttpClientProvider {
    /// Builds the client from `config`.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        Ok(Self::from_client(HttpClient::new(config)?))
    }

    /// Wraps an already built client.
    pub fn from_client(client: HttpClient) -> Self {
        info!("HTTP client provider created");
        Self {
            slot: InstanceSlot::new(client),
        }
    }

    /// Alias of [`ClientProvider::get_instance`].
    pub fn connect(&self) -> Option<Arc<HttpClient>> {
        self.slot.load()
    }
}

impl ClientProvider<HttpClient> for HttpClientProvider {
    fn get_instance(&self) -> Option<Arc<HttpClient>> {
        self.slot.load()
    }

    fn close(&self) {
        if self.slot.take().is_some() {
            info!("HTTP client provider closed");
        }
    }
}
