//! Unit tests for the routing facade

use crate::support::{
    model, provider_with_operator_key, request, snapshot, AllowAll, DenyAll, FixedCatalog,
    MapAffinity, MapCredentialStore, PlainCrypto, RecordingSink, ScriptedOutcome,
    ScriptedUpstream, TestHealthTracker,
};
use mre_application::use_cases::credentials::CredentialResolver;
use mre_application::use_cases::dispatch::Dispatcher;
use mre_application::use_cases::routing_service::RoutingService;
use mre_domain::error::Error;
use mre_domain::ports::infrastructure::catalog::CatalogSnapshot;
use mre_domain::ports::infrastructure::routing::RateLimiter;
use mre_domain::value_objects::{PowerLevel, ProviderType, UsageStatus};
use std::sync::Arc;

struct Harness {
    upstream: Arc<ScriptedUpstream>,
    sink: Arc<RecordingSink>,
    service: RoutingService,
}

fn service_over(snapshot: CatalogSnapshot, rate_limiter: Arc<dyn RateLimiter>) -> Harness {
    let upstream = Arc::new(ScriptedUpstream::new());
    let health = Arc::new(TestHealthTracker::new());
    let sink = Arc::new(RecordingSink::new());
    let resolver = CredentialResolver::new(
        Arc::new(MapCredentialStore::new()),
        Arc::new(PlainCrypto),
    );
    let dispatcher = Dispatcher::new(
        Arc::clone(&upstream) as _,
        Arc::clone(&health) as _,
        Arc::new(MapAffinity::new()) as _,
        Arc::clone(&sink) as _,
    );
    let service = RoutingService::new(
        Arc::new(FixedCatalog::new(snapshot)) as _,
        resolver,
        rate_limiter,
        health as _,
        dispatcher,
    );
    Harness {
        upstream,
        sink,
        service,
    }
}

fn two_provider_snapshot() -> CatalogSnapshot {
    snapshot(
        vec![
            provider_with_operator_key("p1", ProviderType::OpenAi),
            provider_with_operator_key("p2", ProviderType::Anthropic),
        ],
        vec![
            model("m1", "p1", 0.005, 0.005, 8192, 1000.0, 0.8),
            model("m2", "p2", 0.0025, 0.0025, 8192, 2000.0, 0.7),
        ],
    )
}

#[tokio::test(start_paused = true)]
async fn test_happy_path_routes_to_best_candidate() {
    let h = service_over(two_provider_snapshot(), Arc::new(AllowAll));
    // Eco weights lean on cost, so the cheaper p2 ranks first
    h.upstream.script("p2", vec![ScriptedOutcome::Succeed(5)]);

    let response = h
        .service
        .route_and_dispatch("user-1", PowerLevel::Eco, None, request())
        .await
        .expect("request served");

    assert_eq!(response.provider, "p2");
    assert_eq!(response.attempts, 1);
    let records = h.sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, UsageStatus::Success);
    assert_eq!(records[0].user_id, "user-1");
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_caller_rejected_before_dispatch() {
    let h = service_over(two_provider_snapshot(), Arc::new(DenyAll));

    let err = h
        .service
        .route_and_dispatch("user-1", PowerLevel::Balanced, None, request())
        .await
        .expect_err("caller over the limit");

    assert!(matches!(err, Error::RateLimitExceeded { .. }));
    // Provider-independent rejection: nothing was attempted or metered
    assert!(h.upstream.calls().is_empty());
    assert!(h.sink.records().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_empty_catalog_is_service_unavailable() {
    let h = service_over(CatalogSnapshot::empty(), Arc::new(AllowAll));

    let err = h
        .service
        .route_and_dispatch("user-1", PowerLevel::Balanced, None, request())
        .await
        .expect_err("nothing to route to");

    match err {
        Error::ServiceUnavailable { attempts } => assert_eq!(attempts, 0),
        other => panic!("expected ServiceUnavailable, got {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_oversized_request_filtered_to_fitting_models() {
    let h = service_over(two_provider_snapshot(), Arc::new(AllowAll));
    h.upstream.script("p1", vec![ScriptedOutcome::Succeed(5)]);
    h.upstream.script("p2", vec![ScriptedOutcome::Succeed(5)]);

    let mut oversized = request();
    oversized.declared_input_tokens = 100_000;

    let err = h
        .service
        .route_and_dispatch("user-1", PowerLevel::Balanced, None, oversized)
        .await
        .expect_err("no model fits the declared input");
    assert!(matches!(err, Error::ServiceUnavailable { attempts: 0 }));
    assert!(h.upstream.calls().is_empty());
}
