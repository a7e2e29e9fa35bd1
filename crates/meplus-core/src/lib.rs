//! MePlus Core - plan gating and credentials
//!
//! Pure verdict logic shared by every consumer of the SDK:
//! - The entitlement table: which categories and features a plan may use
//! - The quota evaluator: remaining usage and exceeded states
//! - The credential model consumed by the request gateway
//!
//! Entitlement and quota functions are total and side-effect free: identical
//! inputs always yield identical outputs, and absence of a match is a valid
//! (negative) answer rather than an error.

pub mod credential;
pub mod entitlement;
pub mod quota;

pub use credential::{Credential, CredentialError, CredentialSource};
pub use entitlement::{is_category_accessible, is_category_free, is_feature_enabled};
pub use quota::{evaluate, is_exceeded, remaining};
