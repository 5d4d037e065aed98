//! Unit tests for usage metering value objects

use mre_domain::value_objects::{
    CredentialOrigin, ErrorClass, TokenUsage, UsageRecord, UsageStatus,
};

#[test]
fn test_transient_classes() {
    assert!(ErrorClass::Timeout.is_transient());
    assert!(ErrorClass::RateLimited.is_transient());
    assert!(ErrorClass::ServerError.is_transient());
}

#[test]
fn test_permanent_classes() {
    assert!(!ErrorClass::AuthRejected.is_transient());
    assert!(!ErrorClass::BadRequest.is_transient());
}

#[test]
fn test_token_usage_total() {
    assert_eq!(TokenUsage::new(120, 45).total(), 165);
}

#[test]
fn test_success_record_carries_attribution() {
    let record = UsageRecord::success(
        "req-1",
        "user-1",
        "p1",
        "m1",
        CredentialOrigin::Operator,
        TokenUsage::new(100, 50),
        0.0125,
        850,
        2,
    );
    assert_eq!(record.status, UsageStatus::Success);
    assert_eq!(record.provider.as_deref(), Some("p1"));
    assert_eq!(record.paid_by, Some(CredentialOrigin::Operator));
    assert_eq!(record.attempts, 2);
    assert!(record.error_class.is_none());
}

#[test]
fn test_failure_record_without_any_attempt() {
    let record = UsageRecord::failure("req-2", "user-1", None, None, None, 0);
    assert_eq!(record.status, UsageStatus::Failed);
    assert!(record.provider.is_none());
    assert_eq!(record.cost, 0.0);
    assert_eq!(record.attempts, 0);
}

#[test]
fn test_failure_record_keeps_last_error_class() {
    let record = UsageRecord::failure(
        "req-3",
        "user-1",
        Some("p2"),
        Some("m2"),
        Some(ErrorClass::ServerError),
        3,
    );
    assert_eq!(record.error_class, Some(ErrorClass::ServerError));
    assert_eq!(record.provider.as_deref(), Some("p2"));
}

#[test]
fn test_cancelled_record_keeps_provider_for_reconciliation() {
    let record = UsageRecord::cancelled("req-4", "user-1", "p1", "m1", 1);
    assert_eq!(record.status, UsageStatus::Cancelled);
    assert_eq!(record.provider.as_deref(), Some("p1"));
    assert!(record.paid_by.is_none());
}
