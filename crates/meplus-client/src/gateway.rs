//! Authenticated request gateway
//!
//! Every outbound call independently resolves a bearer credential: a valid
//! session is attached as-is, an expired one gets exactly one refresh
//! attempt, and a failed refresh lets the call proceed unauthenticated so
//! the backend's authorization failure is surfaced instead of blocking.
//! Concurrent calls do not coalesce refreshes.
//!
//! Token contents are never logged.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use meplus_core::CredentialSource;
use meplus_types::ApiResponse;

use crate::metrics::{self, Outcome};
use crate::{ClientConfig, ClientError};

/// Header carrying the project identifier.
pub const PROJECT_HEADER: &str = "x-meplus-project";

/// Gateway for authenticated calls to the backend.
pub struct RequestGateway {
    http: Client,
    config: ClientConfig,
    credentials: Arc<dyn CredentialSource>,
}

impl RequestGateway {
    /// Create a gateway with a tuned HTTP client.
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialSource>) -> Self {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            config,
            credentials,
        }
    }

    /// Get the gateway configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve the bearer token for one outbound call.
    ///
    /// State machine per call: a valid credential is used directly; an
    /// expired one triggers exactly one refresh attempt; when the source has
    /// no session, refuses, or the refresh fails, the call proceeds without
    /// a token.
    pub async fn bearer(&self) -> Option<String> {
        let session = match self.credentials.current_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "credential source unavailable, proceeding unauthenticated");
                return None;
            }
        };

        match session {
            Some(credential) if !credential.is_expired() => Some(credential.access_token),
            Some(_) => match self.credentials.refresh_session().await {
                Ok(credential) => {
                    debug!("credential refreshed");
                    Some(credential.access_token)
                }
                Err(e) => {
                    warn!(error = %e, "credential refresh failed, proceeding unauthenticated");
                    None
                }
            },
            None => {
                debug!("no active session, proceeding unauthenticated");
                None
            }
        }
    }

    /// Build the absolute URL for an API path.
    pub(crate) fn url(&self, path: &str) -> String {
        let base = self.config.base_url().as_str().trim_end_matches('/');
        format!("{base}{path}")
    }

    /// GET a path and unwrap the response envelope.
    #[instrument(skip(self), level = "debug")]
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.http.get(self.url(path));
        self.dispatch("GET", path, request).await
    }

    /// GET a path with query parameters.
    #[instrument(skip(self, query), level = "debug")]
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        self.dispatch("GET", path, request).await
    }

    /// POST a JSON body.
    #[instrument(skip(self, body), level = "debug")]
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.post(self.url(path)).json(body);
        self.dispatch("POST", path, request).await
    }

    /// PATCH a JSON body.
    #[instrument(skip(self, body), level = "debug")]
    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.patch(self.url(path)).json(body);
        self.dispatch("PATCH", path, request).await
    }

    /// DELETE a path. Success needs no data payload.
    #[instrument(skip(self), level = "debug")]
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let request = self.http.delete(self.url(path));
        let _: Option<serde_json::Value> = self.dispatch_optional("DELETE", path, request).await?;
        Ok(())
    }

    /// Execute a request and unwrap the envelope, requiring `data`.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        self.dispatch_optional(method, path, request)
            .await?
            .ok_or_else(|| {
                ClientError::Serialization("missing data in successful response".to_string())
            })
    }

    /// Execute a request and unwrap the envelope, allowing absent `data`.
    async fn dispatch_optional<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        let request = match self.bearer().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .header(PROJECT_HEADER, self.config.project_id())
            .send()
            .await
            .map_err(|e| {
                let error = self.transport_error(e);
                let outcome = if matches!(error, ClientError::Timeout(_)) {
                    Outcome::Timeout
                } else {
                    Outcome::Error
                };
                metrics::record_request(method, path, outcome);
                error
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if status == StatusCode::UNAUTHORIZED {
            metrics::record_request(method, path, Outcome::Error);
            return Err(ClientError::Unauthenticated(
                "backend rejected credentials".to_string(),
            ));
        }

        if !status.is_success() {
            metrics::record_request(method, path, Outcome::Error);
            return Err(rejection_from_body(status, &bytes));
        }

        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes).map_err(|e| {
            debug!(status = %status, "failed to decode response envelope");
            metrics::record_request(method, path, Outcome::Error);
            ClientError::Serialization(e.to_string())
        })?;

        if !envelope.success {
            let (code, message) = envelope.error_parts();
            metrics::record_request(method, path, Outcome::Error);
            return Err(ClientError::server_rejected(status.as_u16(), code, message));
        }

        metrics::record_request(method, path, Outcome::Success);
        Ok(envelope.data)
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.config.request_timeout())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl std::fmt::Debug for RequestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestGateway")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Map a non-2xx body to a server rejection.
///
/// Non-2xx responses usually still carry the structured envelope; anything
/// else (a proxy error page, an empty body) degrades to the HTTP status.
fn rejection_from_body(status: StatusCode, body: &[u8]) -> ClientError {
    if let Ok(envelope) = serde_json::from_slice::<ApiResponse<serde_json::Value>>(body) {
        let (code, message) = envelope.error_parts();
        return ClientError::server_rejected(status.as_u16(), code, message);
    }
    ClientError::server_rejected(
        status.as_u16(),
        format!("HTTP_{}", status.as_u16()),
        status.canonical_reason().unwrap_or("request failed"),
    )
}
