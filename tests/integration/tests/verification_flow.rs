//! Integration test: employer verification flow across crates.
//!
//! Store seeded from a fixture file → single lookups gated by
//! sensitivity → permission grants → audit history → batch triage.

use std::sync::Arc;

use certitrust_core::{CredentialId, CredentialStatus, FixtureFile};
use certitrust_verify::{
    BatchStatus, InMemoryCredentialStore, VerificationEngine, VerificationOutcome,
    VerificationQuery, VerificationResult,
};

const FIXTURE: &str = r#"
[[credentials]]
id = 1
holder_address = "0xABC123"
issuer = "University of Technology"
course = "Bachelor of Science in Computer Science"
date_completed = "2021-06-15"
status = "Verified"
sensitive = true

[[credentials]]
id = 2
holder_address = "0xDEF456"
issuer = "Data Science Academy"
course = "Certified Data Analyst"
date_completed = "2022-08-20"
status = "Pending Verification"
sensitive = true

[[credentials]]
id = 3
holder_address = "0xGHI789"
issuer = "Online Learning Platform"
course = "AI Fundamentals"
date_completed = "2023-01-10"
status = "Verified"
sensitive = false

[[credentials]]
id = 4
holder_address = "0xGHI789"
issuer = "Online Learning Platform"
course = "Machine Learning II"
date_completed = "2024-02-11"
status = "Pending Verification"
sensitive = false
"#;

fn id(value: u64) -> CredentialId {
    CredentialId::new(value).unwrap()
}

fn engine() -> VerificationEngine {
    let fixture = FixtureFile::from_toml_str(FIXTURE).expect("fixture should parse");
    let store = InMemoryCredentialStore::from_fixture(fixture).expect("store should seed");
    VerificationEngine::new(Arc::new(store))
}

// =========================================================================
// Single lookups
// =========================================================================

#[test]
fn test_non_sensitive_never_requires_permission() {
    let engine = engine();
    for value in [3, 4] {
        let result = engine.verify_one(&VerificationQuery::by_id(id(value)));
        assert!(
            result.credential().is_some(),
            "credential {} should be disclosed, got {:?}",
            value,
            result
        );
    }
}

#[test]
fn test_sensitive_grant_lifecycle() {
    let engine = engine();

    // Ungranted: gated, not audited, repeatedly.
    for _ in 0..3 {
        let result = engine.verify_one(&VerificationQuery::by_id(id(2)));
        assert_eq!(result.outcome(), Some(VerificationOutcome::PermissionRequired));
        assert!(result.credential().is_none());
    }
    assert!(engine.history().is_empty());

    engine.request_permission(id(2));

    // Granted: disclosed per status, never gated again.
    for _ in 0..2 {
        let result = engine.verify_one(&VerificationQuery::by_id(id(2)));
        match result {
            VerificationResult::Pending { credential } => {
                assert_eq!(credential.course, "Certified Data Analyst");
                assert_eq!(credential.status, CredentialStatus::PendingVerification);
            }
            other => panic!("expected Pending, got {:?}", other),
        }
    }
    assert_eq!(engine.history().len(), 2);
}

#[test]
fn test_grant_covers_lookup_by_address() {
    let engine = engine();
    let by_address = VerificationQuery::by_address("0xABC123");
    assert_eq!(
        engine.verify_one(&by_address).outcome(),
        Some(VerificationOutcome::PermissionRequired)
    );
    engine.request_permission(id(1));
    assert_eq!(
        engine.verify_one(&by_address).outcome(),
        Some(VerificationOutcome::Valid)
    );
    assert_eq!(engine.history()[0].query, "0xABC123");
}

#[test]
fn test_shared_address_resolves_to_first_in_store_order() {
    let engine = engine();
    let result = engine.verify_one(&VerificationQuery::by_address("0xGHI789"));
    assert_eq!(result.credential().unwrap().id, id(3));
}

#[test]
fn test_history_records_calls_in_order() {
    let engine = engine();
    engine.verify_one(&VerificationQuery::by_id(id(3)));
    engine.verify_one(&VerificationQuery::by_id(id(999)));
    engine.verify_one(&VerificationQuery::by_id(id(1))); // gated, not audited
    engine.verify_one(&VerificationQuery::default()); // invalid, not audited
    engine.verify_one(&VerificationQuery::by_address("0xNOBODY"));

    let history = engine.history();
    let rows: Vec<(&str, VerificationOutcome)> = history
        .iter()
        .map(|a| (a.query.as_str(), a.outcome))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("3", VerificationOutcome::Valid),
            ("999", VerificationOutcome::NotFound),
            ("0xNOBODY", VerificationOutcome::NotFound),
        ]
    );
    assert!(history
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn test_history_keeps_form_text_as_typed() {
    let engine = engine();
    engine.verify_one(&VerificationQuery::from_form("03", ""));
    engine.verify_one(&VerificationQuery::from_form("  ", " 0xGHI789 "));
    let queries: Vec<String> = engine.history().into_iter().map(|a| a.query).collect();
    assert_eq!(queries, vec!["03".to_string(), "0xGHI789".to_string()]);
}

#[test]
fn test_grants_are_idempotent_and_global_to_the_engine() {
    let engine = engine();
    assert!(engine.request_permission(id(1)));
    assert!(!engine.request_permission(id(1)));
    // Granting an unknown id is accepted and harmless.
    assert!(engine.request_permission(id(500)));
    let granted: Vec<u64> = engine.grants().iter().map(|i| i.value()).collect();
    assert_eq!(granted, vec![1, 500]);
}

// =========================================================================
// Batch triage
// =========================================================================

#[test]
fn test_batch_reports_status_in_input_order() {
    let engine = engine();
    let results = engine.verify_batch(&["1", "2", "999"]);
    let json = serde_json::to_value(&results).unwrap();
    let rows: Vec<(String, String)> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            (
                r["query"].as_str().unwrap().to_string(),
                r["status"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("1".to_string(), "Verified".to_string()),
            ("2".to_string(), "Pending Verification".to_string()),
            ("999".to_string(), "Not Found".to_string()),
        ]
    );
}

#[test]
fn test_batch_is_isolated_from_gate_and_history() {
    let engine = engine();
    let results = engine.verify_batch_input("1, 2,abc , 1");
    let statuses: Vec<BatchStatus> = results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            BatchStatus::Verified,
            BatchStatus::PendingVerification,
            BatchStatus::NotFound,
            BatchStatus::Verified,
        ]
    );
    assert_eq!(results[2].query, "abc");
    assert!(engine.history().is_empty());
    assert!(engine.grants().is_empty());
    assert_eq!(engine.batch_results(), results);
}

#[test]
fn test_independent_sessions_do_not_share_grants() {
    let fixture = FixtureFile::from_toml_str(FIXTURE).unwrap();
    let store = Arc::new(InMemoryCredentialStore::from_fixture(fixture).unwrap());
    let first = VerificationEngine::new(store.clone());
    let second = VerificationEngine::new(store);
    assert_ne!(first.session_id(), second.session_id());

    first.request_permission(id(1));
    assert_eq!(
        second.verify_one(&VerificationQuery::by_id(id(1))).outcome(),
        Some(VerificationOutcome::PermissionRequired)
    );
    assert!(first.history().is_empty());
}
