//! MePlus State - view-state stores
//!
//! Independent keyed stores for per-feature UI state with no relation to
//! server truth: theme, active category, sidebar, and notification
//! read-state. Each store carries an explicit persistence scope
//! ([`PersistScope::Session`] or [`PersistScope::Durable`]) and owns its
//! backend, so a failure to persist one store never affects the in-memory
//! correctness of any other store.

pub mod category;
pub mod notifications;
pub mod persist;
pub mod sidebar;
pub mod theme;

pub use category::ActiveCategoryStore;
pub use notifications::NotificationStore;
pub use persist::{backend_for, JsonFileBackend, MemoryBackend, PersistScope, StateBackend, StateError};
pub use sidebar::SidebarStore;
pub use theme::{Theme, ThemeStore};
