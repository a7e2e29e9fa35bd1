//! Integration tests for meplus-client.
//!
//! These tests verify the SDK components work correctly together: config
//! building, the gateway's per-call credential resolution, and the local
//! gates (validation, quota) that must fire before any network I/O. The
//! backend itself stays out of the picture - network-touching assertions
//! use an unroutable endpoint so a dispatched request fails fast with a
//! transport error, which is itself the proof that a gate did not fire.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::MockCredentialSource;
use meplus_client::{
    CacheConfig, ClientConfig, ClientError, ConfigError, MeplusClient, RequestGateway, ResourceTag,
};
use meplus_types::{CreateTask, Plan, UsageLimits, UsageReport, UsageSnapshot};

fn test_config() -> ClientConfig {
    // Port 9 (discard) is not listening; any dispatched request fails fast.
    ClientConfig::builder()
        .base_url("http://127.0.0.1:9")
        .project_id("proj_test")
        .connect_timeout(Duration::from_millis(200))
        .request_timeout(Duration::from_millis(500))
        .build()
        .unwrap()
}

fn usage_report(tasks_generated: u32, limit: u32) -> UsageReport {
    UsageReport {
        snapshot: UsageSnapshot {
            tasks_generated,
            export_count: 0,
        },
        limits: UsageLimits {
            tasks_generated: limit,
            export_limit: 5,
        },
        period_start: Utc::now(),
        period_end: Utc::now(),
    }
}

fn create_request() -> CreateTask {
    CreateTask {
        title: "Weekly review".to_string(),
        description: "Plan my week".to_string(),
        category: "planning".to_string(),
        template_id: None,
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_full_config_builder() {
    let config = ClientConfig::builder()
        .base_url("https://api.meplus.example")
        .project_id("proj_live")
        .connect_timeout(Duration::from_secs(10))
        .request_timeout(Duration::from_secs(60))
        .build()
        .unwrap();

    assert_eq!(config.base_url().as_str(), "https://api.meplus.example/");
    assert_eq!(config.project_id(), "proj_live");
    assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    assert_eq!(config.request_timeout(), Duration::from_secs(60));
}

#[test]
fn test_config_requires_base_url_and_project() {
    assert!(matches!(
        ClientConfig::builder().project_id("p").build(),
        Err(ConfigError::MissingBaseUrl)
    ));
    assert!(matches!(
        ClientConfig::builder().base_url("https://x.example").build(),
        Err(ConfigError::MissingProjectId)
    ));
}

// =============================================================================
// Credential Resolution Tests
// =============================================================================

#[tokio::test]
async fn test_valid_session_is_attached_without_refresh() {
    let source = Arc::new(MockCredentialSource::with_valid_session("live-token"));
    let gateway = RequestGateway::new(test_config(), source.clone());

    let bearer = gateway.bearer().await;
    assert_eq!(bearer.as_deref(), Some("live-token"));
    assert_eq!(source.refresh_calls(), 0);
}

#[tokio::test]
async fn test_expired_session_refreshes_exactly_once() {
    let source = Arc::new(MockCredentialSource::with_expired_session(
        "stale-token",
        "fresh-token",
    ));
    let gateway = RequestGateway::new(test_config(), source.clone());

    // The refreshed token is carried, not the stale one.
    let bearer = gateway.bearer().await;
    assert_eq!(bearer.as_deref(), Some("fresh-token"));
    assert_eq!(source.refresh_calls(), 1);
}

#[tokio::test]
async fn test_failed_refresh_proceeds_unauthenticated() {
    let source = Arc::new(MockCredentialSource::with_failing_refresh("stale-token"));
    let gateway = RequestGateway::new(test_config(), source.clone());

    // No header, no hang, no panic.
    let bearer = gateway.bearer().await;
    assert!(bearer.is_none());
    assert_eq!(source.refresh_calls(), 1);
}

#[tokio::test]
async fn test_missing_session_skips_refresh() {
    let source = Arc::new(MockCredentialSource::without_session());
    let gateway = RequestGateway::new(test_config(), source.clone());

    assert!(gateway.bearer().await.is_none());
    assert_eq!(source.current_calls(), 1);
    assert_eq!(source.refresh_calls(), 0);
}

#[tokio::test]
async fn test_each_call_resolves_independently() {
    let source = Arc::new(MockCredentialSource::with_expired_session(
        "stale-token",
        "fresh-token",
    ));
    let gateway = RequestGateway::new(test_config(), source.clone());

    // First call refreshes; the second sees the refreshed session.
    gateway.bearer().await;
    let bearer = gateway.bearer().await;
    assert_eq!(bearer.as_deref(), Some("fresh-token"));
    assert_eq!(source.refresh_calls(), 1);
    assert_eq!(source.current_calls(), 2);
}

// =============================================================================
// Local Gates (no network)
// =============================================================================

#[tokio::test]
async fn test_quota_gate_blocks_before_any_network_call() {
    let source = Arc::new(MockCredentialSource::with_valid_session("live-token"));
    let client = MeplusClient::new(test_config(), source);

    // Prime the usage projection: Base user at 10/10.
    client
        .cache()
        .get_or_fetch_usage("current", || async { Ok(usage_report(10, 10)) })
        .await
        .unwrap();

    let err = client
        .tasks()
        .generate(Plan::Base, &create_request())
        .await
        .unwrap_err();

    // A dispatched request against the unroutable endpoint would have come
    // back as a transport error instead.
    assert!(matches!(err, ClientError::QuotaExceeded(_)));
    assert!(err.is_local());
}

#[tokio::test]
async fn test_pro_plan_bypasses_the_quota_gate() {
    let source = Arc::new(MockCredentialSource::with_valid_session("live-token"));
    let client = MeplusClient::new(test_config(), source);

    // Usage far over the limit; Pro must still reach dispatch.
    client
        .cache()
        .get_or_fetch_usage("current", || async { Ok(usage_report(500, 100)) })
        .await
        .unwrap();

    let err = client
        .tasks()
        .generate(Plan::Pro, &create_request())
        .await
        .unwrap_err();

    // The gate let the request through; only the transport failed.
    assert!(err.is_retryable(), "expected a transport error, got {err:?}");
}

#[tokio::test]
async fn test_validation_fires_before_the_quota_fetch() {
    let source = Arc::new(MockCredentialSource::with_valid_session("live-token"));
    let client = MeplusClient::new(test_config(), source);

    let mut bad = create_request();
    bad.description = String::new();

    // No usage was primed: a quota fetch would hit the network and fail as
    // a transport error, so a validation error proves nothing was fetched.
    let err = client.tasks().generate(Plan::Base, &bad).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_locked_category_is_rejected_locally() {
    let source = Arc::new(MockCredentialSource::with_valid_session("live-token"));
    let client = MeplusClient::new(test_config(), source);

    let mut locked = create_request();
    locked.category = "events".to_string();

    let err = client
        .tasks()
        .generate(Plan::Base, &locked)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

// =============================================================================
// Cache Behavior Through the Client
// =============================================================================

#[tokio::test]
async fn test_usage_invalidation_forces_a_refetch() {
    let source = Arc::new(MockCredentialSource::with_valid_session("live-token"));
    let client = MeplusClient::with_cache_config(
        test_config(),
        source,
        CacheConfig::new().with_ttl(Duration::from_secs(600)),
    );

    client
        .cache()
        .get_or_fetch_usage("current", || async { Ok(usage_report(1, 10)) })
        .await
        .unwrap();

    // Cached read serves the primed report without invoking the fetch.
    let report = client
        .cache()
        .get_or_fetch_usage("current", || async {
            panic!("cache should have served this read")
        })
        .await
        .unwrap();
    assert_eq!(report.snapshot.tasks_generated, 1);

    // After invalidation the next read must fetch fresh state.
    client.cache().invalidate(ResourceTag::Usage);
    let report = client
        .cache()
        .get_or_fetch_usage("current", || async { Ok(usage_report(2, 10)) })
        .await
        .unwrap();
    assert_eq!(report.snapshot.tasks_generated, 2);
}

// =============================================================================
// Sign-out Flow
// =============================================================================

#[tokio::test]
async fn test_sign_out_clears_the_cache_and_the_session() {
    let source = Arc::new(MockCredentialSource::with_valid_session("live-token"));
    let client = MeplusClient::new(test_config(), source.clone());

    client
        .cache()
        .get_or_fetch_usage("current", || async { Ok(usage_report(1, 10)) })
        .await
        .unwrap();

    client.account().sign_out().await.unwrap();
    assert_eq!(source.sign_out_calls(), 1);

    // The cached projection is gone; a read now invokes the fetch again.
    let report = client
        .cache()
        .get_or_fetch_usage("current", || async { Ok(usage_report(0, 10)) })
        .await
        .unwrap();
    assert_eq!(report.snapshot.tasks_generated, 0);

    // And the gateway no longer resolves a bearer token.
    assert!(client.gateway().bearer().await.is_none());
}

// =============================================================================
// Error Taxonomy
// =============================================================================

#[test]
fn test_error_classification() {
    assert!(ClientError::Network("reset".into()).is_retryable());
    assert!(ClientError::Timeout(Duration::from_secs(30)).is_retryable());
    assert!(!ClientError::Validation("bad".into()).is_retryable());

    assert!(ClientError::Unauthenticated("expired".into()).requires_sign_out());
    assert!(!ClientError::Network("reset".into()).requires_sign_out());

    assert!(ClientError::QuotaExceeded("limit".into()).is_local());
    assert!(!ClientError::server_rejected(500, "INTERNAL_ERROR", "boom").is_local());
}
