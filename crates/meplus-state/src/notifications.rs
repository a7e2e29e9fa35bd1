//! Notification read-state store
//!
//! Tracks which notification ids the user has read. The notification list
//! itself is server state; only the read markers live here.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::warn;

use crate::persist::{backend_for, PersistScope, StateBackend, StateError};

const KEY: &str = "notifications_read";

/// Store for per-notification read markers.
pub struct NotificationStore {
    read: BTreeSet<String>,
    backend: Arc<dyn StateBackend>,
}

impl NotificationStore {
    /// Create a store with the given persistence scope.
    pub fn new(scope: PersistScope) -> Self {
        Self::with_backend(backend_for(scope))
    }

    /// Create a store over an explicit backend.
    pub fn with_backend(backend: Arc<dyn StateBackend>) -> Self {
        let read = backend
            .load(KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { read, backend }
    }

    /// Whether a notification has been read.
    pub fn is_read(&self, id: &str) -> bool {
        self.read.contains(id)
    }

    /// Number of notifications marked read.
    pub fn read_count(&self) -> usize {
        self.read.len()
    }

    /// Number of unread ids among the given notification list.
    pub fn unread_count<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        ids.into_iter().filter(|id| !self.is_read(id)).count()
    }

    /// Mark one notification read.
    pub fn mark_read(&mut self, id: impl Into<String>) -> Result<(), StateError> {
        self.read.insert(id.into());
        self.persist()
    }

    /// Mark every given notification read.
    pub fn mark_all_read<I, S>(&mut self, ids: I) -> Result<(), StateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.read.insert(id.into());
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), StateError> {
        let raw = serde_json::to_string(&self.read).map_err(|source| StateError::Encode {
            key: KEY.to_string(),
            source,
        })?;
        self.backend.save(KEY, &raw).map_err(|e| {
            warn!(error = %e, "failed to persist notification read-state");
            e
        })
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore")
            .field("read_count", &self.read.len())
            .finish_non_exhaustive()
    }
}
