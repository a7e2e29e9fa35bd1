//! Usage client
//!
//! The usage snapshot is a server-owned projection: fetched on demand,
//! never mutated locally, invalidated whenever an action the backend counts
//! toward usage succeeds.

use std::sync::Arc;

use tracing::instrument;

use meplus_core::quota;
use meplus_types::{Plan, QuotaVerdict, UsageReport};

use crate::cache::{ResourceCache, ResourceTag};
use crate::gateway::RequestGateway;
use crate::Result;

/// Client for usage and quota reads.
#[derive(Clone)]
pub struct UsageClient {
    gateway: Arc<RequestGateway>,
    cache: Arc<ResourceCache>,
}

impl UsageClient {
    pub(crate) fn new(gateway: Arc<RequestGateway>, cache: Arc<ResourceCache>) -> Self {
        Self { gateway, cache }
    }

    /// Fetch the current usage report, served from cache until the Usage
    /// tag is invalidated.
    #[instrument(skip(self), level = "debug")]
    pub async fn report(&self) -> Result<Arc<UsageReport>> {
        let gateway = self.gateway.clone();
        self.cache
            .get_or_fetch_usage("current", move || async move { gateway.get("/usage").await })
            .await
    }

    /// Evaluate the caller's quota against the latest usage report.
    #[instrument(skip(self), level = "debug")]
    pub async fn verdict(&self, plan: Plan) -> Result<QuotaVerdict> {
        let report = self.report().await?;
        Ok(quota::evaluate(&report.snapshot, &report.limits, plan))
    }

    /// Mark the cached report stale, forcing the next read to refetch.
    pub fn invalidate(&self) {
        self.cache.invalidate(ResourceTag::Usage);
    }
}

impl std::fmt::Debug for UsageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageClient").finish()
    }
}
