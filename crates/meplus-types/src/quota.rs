//! Usage and quota types
//!
//! A [`UsageSnapshot`] is fetched from the backend, never mutated locally,
//! and becomes stale after any action the backend counts toward usage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Usage counters for the current billing period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    /// Tasks generated this period
    pub tasks_generated: u32,
    /// Exports performed this period
    pub export_count: u32,
}

/// Per-period caps for metered actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLimits {
    /// Maximum tasks generated per period
    pub tasks_generated: u32,
    /// Maximum exports per period
    pub export_limit: u32,
}

/// Usage snapshot paired with its limits and billing window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    /// Current usage counters
    pub snapshot: UsageSnapshot,
    /// Limits for the current plan
    pub limits: UsageLimits,
    /// Billing period start
    pub period_start: DateTime<Utc>,
    /// Billing period end
    pub period_end: DateTime<Utc>,
}

/// Evaluated quota state for a single metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaStatus {
    /// Units consumed this period
    pub used: u32,
    /// Period cap
    pub limit: u32,
    /// Units left before the cap (never negative)
    pub remaining: u32,
    /// Whether the metric is at or over its cap
    pub exceeded: bool,
}

/// Quota verdict across all metered actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaVerdict {
    /// Task generation quota state
    pub tasks: QuotaStatus,
    /// Export quota state
    pub exports: QuotaStatus,
}

impl QuotaVerdict {
    /// Whether any metered action is blocked.
    pub fn any_exceeded(&self) -> bool {
        self.tasks.exceeded || self.exports.exceeded
    }
}
