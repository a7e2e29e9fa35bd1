//! Account client
//!
//! The plan is immutable except through the explicit upgrade action here.
//! Signing out goes through the credential source and drops every cached
//! projection, since cached collections belong to the signed-in user.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use meplus_core::{CredentialError, CredentialSource};
use meplus_types::{Plan, Profile};

use crate::cache::{ResourceCache, ResourceTag};
use crate::gateway::RequestGateway;
use crate::Result;

#[derive(Serialize)]
struct UpgradeRequest {
    plan: Plan,
}

/// Client for account operations.
#[derive(Clone)]
pub struct AccountClient {
    gateway: Arc<RequestGateway>,
    cache: Arc<ResourceCache>,
    credentials: Arc<dyn CredentialSource>,
}

impl AccountClient {
    pub(crate) fn new(
        gateway: Arc<RequestGateway>,
        cache: Arc<ResourceCache>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            gateway,
            cache,
            credentials,
        }
    }

    /// Fetch the signed-in user's profile.
    #[instrument(skip(self), level = "debug")]
    pub async fn profile(&self) -> Result<Profile> {
        self.gateway.get("/account").await
    }

    /// Upgrade the account to the Pro plan.
    ///
    /// Limits change with the plan, so the cached usage report is stale
    /// after a successful upgrade.
    #[instrument(skip(self), level = "debug")]
    pub async fn upgrade(&self) -> Result<Profile> {
        let profile: Profile = self
            .gateway
            .post("/account/upgrade", &UpgradeRequest { plan: Plan::Pro })
            .await?;
        self.cache.invalidate(ResourceTag::Usage);
        Ok(profile)
    }

    /// End the current session.
    ///
    /// Cached projections are dropped up front; they are disposable and must
    /// not survive into another user's session even if the provider call
    /// fails.
    #[instrument(skip(self), level = "debug")]
    pub async fn sign_out(&self) -> std::result::Result<(), CredentialError> {
        self.cache.clear();
        self.credentials.sign_out().await
    }
}

impl std::fmt::Debug for AccountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountClient").finish()
    }
}
