//! Shared test doubles for client integration tests

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use meplus_core::{Credential, CredentialError, CredentialSource};

/// In-memory credential source with scripted behavior and call counters.
pub struct MockCredentialSource {
    session: Mutex<Option<Credential>>,
    refreshed: Option<Credential>,
    current_calls: AtomicU32,
    refresh_calls: AtomicU32,
    sign_out_calls: AtomicU32,
}

impl MockCredentialSource {
    fn new(session: Option<Credential>, refreshed: Option<Credential>) -> Self {
        Self {
            session: Mutex::new(session),
            refreshed,
            current_calls: AtomicU32::new(0),
            refresh_calls: AtomicU32::new(0),
            sign_out_calls: AtomicU32::new(0),
        }
    }

    /// Source holding a session valid for another hour.
    pub fn with_valid_session(token: &str) -> Self {
        let credential = Credential::new(token, Utc::now().timestamp() + 3600);
        Self::new(Some(credential), None)
    }

    /// Source holding an expired session; refresh mints `refreshed_token`.
    pub fn with_expired_session(stale_token: &str, refreshed_token: &str) -> Self {
        let stale = Credential::new(stale_token, Utc::now().timestamp() - 60);
        let fresh = Credential::new(refreshed_token, Utc::now().timestamp() + 3600);
        Self::new(Some(stale), Some(fresh))
    }

    /// Source holding an expired session whose refresh is rejected.
    pub fn with_failing_refresh(stale_token: &str) -> Self {
        let stale = Credential::new(stale_token, Utc::now().timestamp() - 60);
        Self::new(Some(stale), None)
    }

    /// Source with no session at all.
    pub fn without_session() -> Self {
        Self::new(None, None)
    }

    pub fn current_calls(&self) -> u32 {
        self.current_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> u32 {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> u32 {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialSource for MockCredentialSource {
    async fn current_session(&self) -> Result<Option<Credential>, CredentialError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.session.lock().expect("session lock").clone())
    }

    async fn refresh_session(&self) -> Result<Credential, CredentialError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        match &self.refreshed {
            Some(credential) => {
                let mut session = self.session.lock().expect("session lock");
                *session = Some(credential.clone());
                Ok(credential.clone())
            }
            None => Err(CredentialError::RefreshRejected(
                "refresh token revoked".to_string(),
            )),
        }
    }

    async fn sign_out(&self) -> Result<(), CredentialError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        let mut session = self.session.lock().expect("session lock");
        *session = None;
        Ok(())
    }
}
