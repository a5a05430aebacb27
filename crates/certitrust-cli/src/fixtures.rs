//! Seed data for the credential store.

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

use certitrust_core::{Credential, CredentialId, CredentialStatus, FixtureFile, HolderAddress};
use certitrust_verify::InMemoryCredentialStore;

/// The employer dashboard's demo credentials.
pub fn demo_credentials() -> anyhow::Result<Vec<Credential>> {
    let record = |id: u64,
                  holder: &str,
                  issuer: &str,
                  course: &str,
                  date: &str,
                  status: CredentialStatus,
                  sensitive: bool|
     -> anyhow::Result<Credential> {
        Ok(Credential {
            id: CredentialId::new(id)?,
            holder_address: HolderAddress::new(holder),
            issuer: issuer.into(),
            course: course.into(),
            date_completed: date.into(),
            status,
            sensitive,
        })
    };

    Ok(vec![
        record(
            1,
            "0xABC123",
            "University of Technology",
            "Bachelor of Science in Computer Science",
            "2021-06-15",
            CredentialStatus::Verified,
            true,
        )?,
        record(
            2,
            "0xDEF456",
            "Data Science Academy",
            "Certified Data Analyst",
            "2022-08-20",
            CredentialStatus::Verified,
            false,
        )?,
        record(
            3,
            "0xGHI789",
            "Online Learning Platform",
            "AI Fundamentals",
            "2023-01-10",
            CredentialStatus::PendingVerification,
            true,
        )?,
    ])
}

/// Build the store from a fixture file, or from the demo data when no
/// file is configured.
pub fn load_store(fixtures: Option<&Path>) -> anyhow::Result<Arc<InMemoryCredentialStore>> {
    let credentials = match fixtures {
        Some(path) => {
            FixtureFile::load(path)
                .with_context(|| format!("loading fixtures from {}", path.display()))?
                .credentials
        }
        None => demo_credentials()?,
    };
    let store = InMemoryCredentialStore::from_credentials(credentials)?;
    tracing::info!(credentials = store.count(), "credential store ready");
    Ok(Arc::new(store))
}
