//! MePlus Client - Plan-gated resource client
//!
//! Client SDK for the MePlus task-generation backend. It owns three
//! cross-cutting pieces and the resource clients built on them:
//!
//! - [`RequestGateway`] - attaches a current bearer credential to every
//!   outbound request, refreshing once on expiry and proceeding
//!   unauthenticated when the refresh fails
//! - [`ResourceCache`] - tag-invalidated store of fetched collections; a
//!   mutation on a resource type invalidates every cached read of that type
//! - quota gating - metered actions are evaluated locally against the
//!   latest usage snapshot before any network call
//!
//! ```ignore
//! use std::sync::Arc;
//! use meplus_client::{ClientConfig, MeplusClient};
//!
//! let config = ClientConfig::from_env()?;
//! let client = MeplusClient::new(config, Arc::new(my_credential_source));
//!
//! let tasks = client.tasks().list(&Default::default()).await?;
//! ```

pub mod account;
pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod tasks;
pub mod templates;
pub mod usage;

pub use account::AccountClient;
pub use cache::{CacheConfig, CacheStats, ResourceCache, ResourceTag};
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};
pub use error::ClientError;
pub use gateway::RequestGateway;
pub use tasks::TaskClient;
pub use templates::TemplateClient;
pub use usage::UsageClient;

use std::sync::Arc;

use meplus_core::CredentialSource;

/// Convenient result alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Unified entry point owning the gateway and cache.
///
/// Cheap to clone through the resource-client accessors; all handles share
/// one gateway and one cache.
pub struct MeplusClient {
    gateway: Arc<RequestGateway>,
    cache: Arc<ResourceCache>,
    credentials: Arc<dyn CredentialSource>,
}

impl MeplusClient {
    /// Create a client with the default cache configuration.
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialSource>) -> Self {
        Self::with_cache_config(config, credentials, CacheConfig::default())
    }

    /// Create a client with a custom cache configuration.
    pub fn with_cache_config(
        config: ClientConfig,
        credentials: Arc<dyn CredentialSource>,
        cache_config: CacheConfig,
    ) -> Self {
        let gateway = Arc::new(RequestGateway::new(config, credentials.clone()));
        let cache = Arc::new(ResourceCache::new(cache_config));
        Self {
            gateway,
            cache,
            credentials,
        }
    }

    /// Get the task client.
    pub fn tasks(&self) -> TaskClient {
        TaskClient::new(self.gateway.clone(), self.cache.clone())
    }

    /// Get the template client.
    pub fn templates(&self) -> TemplateClient {
        TemplateClient::new(self.gateway.clone(), self.cache.clone())
    }

    /// Get the usage client.
    pub fn usage(&self) -> UsageClient {
        UsageClient::new(self.gateway.clone(), self.cache.clone())
    }

    /// Get the account client.
    pub fn account(&self) -> AccountClient {
        AccountClient::new(
            self.gateway.clone(),
            self.cache.clone(),
            self.credentials.clone(),
        )
    }

    /// Get the shared resource cache.
    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    /// Get the request gateway.
    pub fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }
}

impl std::fmt::Debug for MeplusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeplusClient")
            .field("gateway", &self.gateway)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
