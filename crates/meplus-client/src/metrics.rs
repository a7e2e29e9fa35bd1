//! Client metrics for observability.
//!
//! Exporter-agnostic counters via the `metrics` facade. Install any
//! compatible recorder (e.g. `metrics-exporter-prometheus`) and the SDK
//! records automatically.
//!
//! # Metrics
//!
//! - `meplus_client_requests_total` - Counter of requests by resource, method, status
//! - `meplus_client_cache_hits` - Counter of resource cache hits by tag
//! - `meplus_client_cache_misses` - Counter of resource cache misses by tag

use metrics::counter;

/// Metric name for total requests.
pub const REQUESTS_TOTAL: &str = "meplus_client_requests_total";

/// Metric name for cache hits.
pub const CACHE_HITS: &str = "meplus_client_cache_hits";

/// Metric name for cache misses.
pub const CACHE_MISSES: &str = "meplus_client_cache_misses";

/// Request outcome for metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
    Timeout,
}

impl Outcome {
    /// Get the outcome as a string for metrics labels.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Timeout => "timeout",
        }
    }
}

/// Record a completed request.
pub fn record_request(method: &'static str, path: &str, outcome: Outcome) {
    counter!(
        REQUESTS_TOTAL,
        "method" => method,
        "path" => path.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Record a resource cache hit.
pub fn record_cache_hit(tag: &'static str) {
    counter!(CACHE_HITS, "tag" => tag).increment(1);
}

/// Record a resource cache miss.
pub fn record_cache_miss(tag: &'static str) {
    counter!(CACHE_MISSES, "tag" => tag).increment(1);
}
