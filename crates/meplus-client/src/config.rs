//! Client configuration
//!
//! Backend base URL and project identifier are read once at startup and
//! never mutated afterwards.

use std::time::Duration;

use thiserror::Error;

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default per-request timeout.
///
/// A stuck request surfaces a retryable timeout error instead of leaving a
/// loading state active indefinitely.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the backend base URL.
pub const ENV_API_URL: &str = "MEPLUS_API_URL";

/// Environment variable holding the project identifier.
pub const ENV_PROJECT_ID: &str = "MEPLUS_PROJECT_ID";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: reqwest::Url,
    project_id: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl ClientConfig {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from the environment.
    ///
    /// Reads a `.env` file if present, then `MEPLUS_API_URL` and
    /// `MEPLUS_PROJECT_ID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(ENV_API_URL).map_err(|_| ConfigError::MissingEnv(ENV_API_URL))?;
        let project_id =
            std::env::var(ENV_PROJECT_ID).map_err(|_| ConfigError::MissingEnv(ENV_PROJECT_ID))?;

        Self::builder()
            .base_url(base_url)
            .project_id(project_id)
            .build()
    }

    /// Backend base URL.
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Project identifier sent with every request.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Connection timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    project_id: Option<String>,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the backend base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the project identifier.
    #[must_use]
    pub fn project_id(mut self, id: impl Into<String>) -> Self {
        self.project_id = Some(id.into());
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let raw = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = raw
            .parse::<reqwest::Url>()
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{raw}: {e}")))?;

        let project_id = self.project_id.ok_or(ConfigError::MissingProjectId)?;
        if project_id.trim().is_empty() {
            return Err(ConfigError::MissingProjectId);
        }

        Ok(ClientConfig {
            base_url,
            project_id,
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        })
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No base URL was provided
    #[error("missing backend base URL")]
    MissingBaseUrl,

    /// The base URL did not parse
    #[error("invalid backend base URL: {0}")]
    InvalidBaseUrl(String),

    /// No project identifier was provided
    #[error("missing project identifier")]
    MissingProjectId,

    /// A required environment variable is not set
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}
