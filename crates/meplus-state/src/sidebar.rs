//! Sidebar store

use std::sync::Arc;

use tracing::warn;

use crate::persist::{backend_for, PersistScope, StateBackend, StateError};

const KEY: &str = "sidebar";

/// Store for the sidebar's collapsed state.
pub struct SidebarStore {
    collapsed: bool,
    backend: Arc<dyn StateBackend>,
}

impl SidebarStore {
    /// Create a store with the given persistence scope.
    pub fn new(scope: PersistScope) -> Self {
        Self::with_backend(backend_for(scope))
    }

    /// Create a store over an explicit backend.
    pub fn with_backend(backend: Arc<dyn StateBackend>) -> Self {
        let collapsed = backend
            .load(KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or(false);
        Self { collapsed, backend }
    }

    /// Whether the sidebar is collapsed.
    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    /// Set the collapsed state.
    pub fn set_collapsed(&mut self, collapsed: bool) -> Result<(), StateError> {
        self.collapsed = collapsed;
        self.persist()
    }

    /// Toggle the collapsed state and return the new value.
    pub fn toggle(&mut self) -> Result<bool, StateError> {
        let next = !self.collapsed;
        self.set_collapsed(next)?;
        Ok(next)
    }

    fn persist(&self) -> Result<(), StateError> {
        let raw = serde_json::to_string(&self.collapsed).map_err(|source| StateError::Encode {
            key: KEY.to_string(),
            source,
        })?;
        self.backend.save(KEY, &raw).map_err(|e| {
            warn!(error = %e, "failed to persist sidebar state");
            e
        })
    }
}

impl std::fmt::Debug for SidebarStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SidebarStore")
            .field("collapsed", &self.collapsed)
            .finish_non_exhaustive()
    }
}
