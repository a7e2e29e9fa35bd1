//! Quota evaluation
//!
//! Pro is unmetered through an explicit plan branch, never through a large
//! numeric limit, so no usage count can ever trip it.

use meplus_types::{Plan, QuotaStatus, QuotaVerdict, UsageLimits, UsageSnapshot};

/// Units left before the cap. Never negative.
pub fn remaining(used: u32, limit: u32) -> u32 {
    limit.saturating_sub(used)
}

/// Whether a metered action is blocked.
///
/// True only for a metered plan with usage at or over the limit.
pub fn is_exceeded(used: u32, limit: u32, plan: Plan) -> bool {
    plan.is_metered() && used >= limit
}

/// Evaluate every metered action against the current snapshot.
pub fn evaluate(snapshot: &UsageSnapshot, limits: &UsageLimits, plan: Plan) -> QuotaVerdict {
    QuotaVerdict {
        tasks: status(snapshot.tasks_generated, limits.tasks_generated, plan),
        exports: status(snapshot.export_count, limits.export_limit, plan),
    }
}

fn status(used: u32, limit: u32, plan: Plan) -> QuotaStatus {
    QuotaStatus {
        used,
        limit,
        remaining: remaining(used, limit),
        exceeded: is_exceeded(used, limit, plan),
    }
}
