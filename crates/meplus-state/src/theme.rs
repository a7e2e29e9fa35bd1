//! Theme store

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::persist::{backend_for, PersistScope, StateBackend, StateError};

const KEY: &str = "theme";

/// Color theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow the OS preference (default)
    #[default]
    System,
}

/// Store for the theme preference.
pub struct ThemeStore {
    current: Theme,
    backend: Arc<dyn StateBackend>,
}

impl ThemeStore {
    /// Create a store with the given persistence scope, loading any
    /// previously persisted value.
    pub fn new(scope: PersistScope) -> Self {
        Self::with_backend(backend_for(scope))
    }

    /// Create a store over an explicit backend.
    pub fn with_backend(backend: Arc<dyn StateBackend>) -> Self {
        let current = backend
            .load(KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { current, backend }
    }

    /// Get the current theme.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Set the theme.
    ///
    /// The in-memory value is updated even when persistence fails; the
    /// error reports only the failed write.
    pub fn set(&mut self, theme: Theme) -> Result<(), StateError> {
        self.current = theme;
        self.persist()
    }

    /// Toggle between light and dark. An explicit choice replaces `System`.
    pub fn toggle(&mut self) -> Result<Theme, StateError> {
        let next = match self.current {
            Theme::Dark => Theme::Light,
            Theme::Light | Theme::System => Theme::Dark,
        };
        self.set(next)?;
        Ok(next)
    }

    fn persist(&self) -> Result<(), StateError> {
        let raw = serde_json::to_string(&self.current).map_err(|source| StateError::Encode {
            key: KEY.to_string(),
            source,
        })?;
        self.backend.save(KEY, &raw).map_err(|e| {
            warn!(error = %e, "failed to persist theme");
            e
        })
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
