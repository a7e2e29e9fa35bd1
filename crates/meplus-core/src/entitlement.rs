//! Category and feature entitlement checks
//!
//! A locked state is decided by (current plan, static tables) and nothing
//! else. Unknown category strings fail closed: they are treated as outside
//! the free subset, never as an error.

use meplus_types::{Category, Feature, Plan};

/// Check whether a category is in the free subset.
///
/// True iff the category's index in [`Category::ALL`] is below
/// [`Category::FREE_COUNT`]. Unknown strings are not free.
pub fn is_category_free(category: &str) -> bool {
    Category::ALL
        .iter()
        .position(|c| c.as_str() == category)
        .is_some_and(|index| index < Category::FREE_COUNT)
}

/// Check whether a plan may use a category.
///
/// Pro accesses every category; Base accesses exactly the free subset.
pub fn is_category_accessible(category: &str, plan: Plan) -> bool {
    match plan {
        Plan::Pro => true,
        Plan::Base => is_category_free(category),
    }
}

/// Check whether a gated feature is enabled for a plan.
pub fn is_feature_enabled(feature: Feature, plan: Plan) -> bool {
    plan_level(plan) >= plan_level(feature.min_plan())
}

/// Get numeric plan level for comparison
fn plan_level(plan: Plan) -> u8 {
    match plan {
        Plan::Base => 1,
        Plan::Pro => 2,
    }
}
