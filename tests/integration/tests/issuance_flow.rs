//! Integration test: issuer → store → employer verification, plus
//! fixture round trips and issuer feedback.

use std::sync::Arc;

use certitrust_core::{CredentialStatus, FixtureFile, HolderAddress};
use certitrust_verify::{
    BatchStatus, CredentialIssuer, FeedbackBook, InMemoryCredentialStore, NewCredential,
    VerificationEngine, VerificationOutcome, VerificationQuery,
};

#[test]
fn test_issued_credentials_are_verifiable() {
    let store = Arc::new(InMemoryCredentialStore::new());
    let issuer = CredentialIssuer::new("University of Technology", Arc::clone(&store));

    let diploma = issuer
        .issue(
            NewCredential::new("0xLEARNER", "Diploma in Computer Science", "2024-06-01")
                .verified()
                .sensitive(),
        )
        .expect("issuance should succeed");
    let certificate = issuer
        .issue(NewCredential::new("0xLEARNER", "Certificate of Excellence", "2024-07-15"))
        .expect("issuance should succeed");
    assert_eq!(diploma.id.value(), 1);
    assert_eq!(certificate.id.value(), 2);

    let engine = VerificationEngine::new(store.clone());

    // Address lookup resolves to the first credential issued to the holder.
    let result = engine.verify_one(&VerificationQuery::by_address("0xLEARNER"));
    assert_eq!(result.outcome(), Some(VerificationOutcome::PermissionRequired));

    let result = engine.verify_one(&VerificationQuery::by_id(certificate.id));
    assert_eq!(result.outcome(), Some(VerificationOutcome::Pending));

    let batch = engine.verify_batch_input("1,2");
    assert_eq!(batch[0].status, BatchStatus::Verified);
    assert_eq!(batch[1].status, BatchStatus::PendingVerification);

    let held = store.find_all_by_address(&HolderAddress::new("0xLEARNER"));
    assert_eq!(held.len(), 2);
}

#[test]
fn test_issuance_after_seeding_continues_ids() {
    let fixture = FixtureFile::from_toml_str(
        r#"
[[credentials]]
id = 7
holder_address = "0xA"
issuer = "Data Science Academy"
course = "Certified Data Analyst"
date_completed = "2022-08-20"
status = "Verified"
"#,
    )
    .unwrap();
    let store = Arc::new(InMemoryCredentialStore::from_fixture(fixture).unwrap());
    let issuer = CredentialIssuer::new("Data Science Academy", Arc::clone(&store));
    let issued = issuer
        .issue(NewCredential::new("0xB", "Advanced Analytics", "2024-01-01"))
        .unwrap();
    assert_eq!(issued.id.value(), 8);
    assert_eq!(issued.status, CredentialStatus::PendingVerification);
}

#[test]
fn test_fixture_file_round_trip_seeds_same_store() {
    let store = Arc::new(InMemoryCredentialStore::new());
    let issuer = CredentialIssuer::new("Online Learning Platform", Arc::clone(&store));
    issuer
        .issue(NewCredential::new("0xGHI789", "AI Fundamentals", "2023-01-10").sensitive())
        .unwrap();
    issuer
        .issue(NewCredential::new("0xXYZ", "Prompt Design", "2023-05-02").verified())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.toml");
    FixtureFile::new(store.list()).save(&path).unwrap();

    let reloaded = InMemoryCredentialStore::from_fixture(FixtureFile::load(&path).unwrap()).unwrap();
    assert_eq!(reloaded.list(), store.list());
}

#[test]
fn test_feedback_on_verified_issuer() {
    let store = Arc::new(InMemoryCredentialStore::new());
    let issuer = CredentialIssuer::new("Data Science Academy", Arc::clone(&store));
    let vc = issuer
        .issue(NewCredential::new("0xDEF456", "Certified Data Analyst", "2022-08-20").verified())
        .unwrap();

    let engine = VerificationEngine::new(store);
    let result = engine.verify_one(&VerificationQuery::by_id(vc.id));
    let credential = result.credential().expect("non-sensitive credential is disclosed");

    let book = FeedbackBook::new();
    book.submit(&credential.issuer, "Graduates were well prepared.", 5)
        .unwrap();
    let entry = book.get("Data Science Academy").unwrap();
    assert_eq!(entry.rating, 5);
    assert!(book.submit(&credential.issuer, "", 5).is_err());
    assert_eq!(book.entries().len(), 1);
}
