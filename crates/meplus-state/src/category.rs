//! Active category store
//!
//! Pure view state: which category the dashboard currently filters by. The
//! label is stored as-is; access gating happens in the entitlement layer,
//! not here.

use std::sync::Arc;

use tracing::warn;

use crate::persist::{backend_for, PersistScope, StateBackend, StateError};

const KEY: &str = "active_category";

/// Store for the currently selected category.
pub struct ActiveCategoryStore {
    active: Option<String>,
    backend: Arc<dyn StateBackend>,
}

impl ActiveCategoryStore {
    /// Create a store with the given persistence scope.
    pub fn new(scope: PersistScope) -> Self {
        Self::with_backend(backend_for(scope))
    }

    /// Create a store over an explicit backend.
    pub fn with_backend(backend: Arc<dyn StateBackend>) -> Self {
        let active = backend
            .load(KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok());
        Self { active, backend }
    }

    /// Get the selected category, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Select a category.
    pub fn select(&mut self, category: impl Into<String>) -> Result<(), StateError> {
        self.active = Some(category.into());
        self.persist()
    }

    /// Clear the selection.
    pub fn clear(&mut self) -> Result<(), StateError> {
        self.active = None;
        self.persist()
    }

    fn persist(&self) -> Result<(), StateError> {
        let raw = serde_json::to_string(&self.active).map_err(|source| StateError::Encode {
            key: KEY.to_string(),
            source,
        })?;
        self.backend.save(KEY, &raw).map_err(|e| {
            warn!(error = %e, "failed to persist active category");
            e
        })
    }
}

impl std::fmt::Debug for ActiveCategoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveCategoryStore")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
