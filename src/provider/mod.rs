//! Lifecycle management of a shared [`HttpClient`](crate::HttpClient).
//!
//! A dependency-injection container needs something that builds a client,
//! hands it out, and tears it down. Two shapes are offered:
//!
//! - [`HttpClientProvider`] - built active, hands out the instance, can be closed
//! - [`HttpClientAdapter`] - starts empty, adds `create`, `connect` and `redeploy`
//!
//! Both hold the instance in an [`InstanceSlot`]. State transitions:
//!
//! ```text
//! Uninitialized --create--> Active --redeploy--> Active
//!                             |                    |
//!                             +-------close--------+--> Closed --create/redeploy--> Active
//! ```
//!
//! Calls already in flight keep using the instance they started with.

pub mod adapter;
#[allow(clippy::module_inception)]
pub mod provider;
pub mod slot;

pub use adapter::HttpClientAdapter;
pub use provider::HttpClientProvider;
pub use slot::InstanceSlot;

use std::sync::Arc;

/// Read and teardown hooks a container calls on a client provider.
pub trait ClientProvider<T> {
    /// The current instance, or `None` once closed.
    fn get_instance(&self) -> Option<Arc<T>>;

    /// Drops the provider's reference to the instance.
    fn close(&self);
}

/// Construction hooks a container calls on a client adapter.
pub trait ClientAdapter<T, C>: ClientProvider<T> {
    /// Builds an instance from `config`, replacing any existing one.
    fn create(&self, config: C) -> crate::Result<Arc<T>>;

    /// The current instance, if any.
    fn connect(&self) -> Option<Arc<T>> {
        self.get_instance()
    }

    /// Rebuilds the instance from `config`, discarding the current one.
    fn redeploy(&self, config: C) -> crate::Result<Arc<T>>;
}
