//! Credential model
//!
//! The credential is owned by the authentication collaborator; this layer
//! only reads it and, on expiry, triggers a refresh through the
//! [`CredentialSource`] seam. Tokens are never persisted here and never
//! logged: the `Debug` impl redacts the token.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

/// A bearer access token plus its expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Raw access token attached as `Authorization: Bearer`
    pub access_token: String,
    /// Expiry as epoch seconds
    pub expires_at: i64,
}

impl Credential {
    /// Create a new credential.
    pub fn new(access_token: impl Into<String>, expires_at: i64) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Check if the credential has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expires_at
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Errors surfaced by a credential source
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The source could not be reached or answered abnormally
    #[error("credential provider error: {0}")]
    Provider(String),

    /// The source refused to mint a fresh credential
    #[error("credential refresh rejected: {0}")]
    RefreshRejected(String),
}

/// Seam to the authentication collaborator.
///
/// Implementations wrap whatever identity provider the application uses.
/// The request gateway calls `current_session` before every outbound
/// request and `refresh_session` at most once per request on expiry.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Get the current session's credential, if any.
    async fn current_session(&self) -> Result<Option<Credential>, CredentialError>;

    /// Mint a fresh credential for the current session.
    async fn refresh_session(&self) -> Result<Credential, CredentialError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), CredentialError>;
}
