//! User profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Plan;

/// The authenticated user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// User ID
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// Current subscription plan
    pub plan: Plan,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}
