//! Client errors
//!
//! The taxonomy mirrors how a failure should be handled by the caller:
//! validation and quota failures are resolved locally and never reach the
//! network; unauthenticated failures should end the session; network and
//! timeout failures are the only retryable class.

use std::time::Duration;

use thiserror::Error;

/// Client errors for MePlus operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No valid credential was available and the backend rejected the call.
    #[error("authentication required: {0}")]
    Unauthenticated(String),

    /// The request did not complete.
    #[error("network failure: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("request timeout after {0:?}")]
    Timeout(Duration),

    /// The backend answered with a structured error.
    #[error("server rejected request ({code}): {message}")]
    ServerRejected {
        /// HTTP status
        status: u16,
        /// Backend error code
        code: String,
        /// Backend error message
        message: String,
    },

    /// Input was rejected before dispatch.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A metered action is at or over its plan limit.
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A response body could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// Returns true if this error is retryable.
    ///
    /// Nothing in this layer retries automatically; the classification is
    /// for callers deciding whether a retry could help.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }

    /// Returns true if the caller should end the session and reauthenticate.
    #[must_use]
    pub fn requires_sign_out(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }

    /// Returns true if the error was produced locally, before any network I/O.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::QuotaExceeded(_) | Self::Config(_)
        )
    }

    /// Create a server rejection error.
    pub fn server_rejected(
        status: u16,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ServerRejected {
            status,
            code: code.into(),
            message: message.into(),
        }
    }
}
