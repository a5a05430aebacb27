use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use certitrust_core::{Credential, CredentialId, FixtureFile, HolderAddress};

use crate::error::CredentialError;

/// Read-only lookup interface the verification engine consumes.
///
/// Reads are fallible so that a non-memory backend can report an outage;
/// the engine turns such failures into a `LookupFailed` outcome.
pub trait CredentialStore: Send + Sync {
    /// Find a credential by its id.
    fn find_by_id(&self, id: CredentialId) -> Result<Option<Credential>, CredentialError>;

    /// Find the first credential, in store order, held by `address`.
    fn find_by_address(
        &self,
        address: &HolderAddress,
    ) -> Result<Option<Credential>, CredentialError>;
}

#[derive(Default)]
struct Records {
    /// Store order is insertion order.
    credentials: Vec<Credential>,
    by_id: HashMap<CredentialId, usize>,
}

impl Records {
    fn push(&mut self, credential: Credential) -> Result<(), CredentialError> {
        if self.by_id.contains_key(&credential.id) {
            return Err(CredentialError::DuplicateCredential(credential.id));
        }
        self.by_id.insert(credential.id, self.credentials.len());
        self.credentials.push(credential);
        Ok(())
    }

    fn next_id(&self) -> CredentialId {
        self.credentials
            .iter()
            .map(|c| c.id)
            .max()
            .map(|id| id.next())
            .unwrap_or_else(CredentialId::first)
    }
}

/// Process-local credential store backed by an ordered list.
pub struct InMemoryCredentialStore {
    records: RwLock<Records>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records::default()),
        }
    }

    /// Seed a store with records, keeping their order.
    pub fn from_credentials(
        credentials: impl IntoIterator<Item = Credential>,
    ) -> Result<Self, CredentialError> {
        let mut records = Records::default();
        for credential in credentials {
            records.push(credential)?;
        }
        tracing::debug!(count = records.credentials.len(), "credential store seeded");
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    /// Seed a store from a parsed fixture file.
    pub fn from_fixture(fixture: FixtureFile) -> Result<Self, CredentialError> {
        Self::from_credentials(fixture.credentials)
    }

    /// All credentials in store order.
    pub fn list(&self) -> Vec<Credential> {
        self.read(|r| r.credentials.clone())
    }

    /// Every credential held by `address`, in store order.
    pub fn find_all_by_address(&self, address: &HolderAddress) -> Vec<Credential> {
        self.read(|r| {
            r.credentials
                .iter()
                .filter(|c| &c.holder_address == address)
                .cloned()
                .collect()
        })
    }

    /// Number of credentials in the store.
    pub fn count(&self) -> usize {
        self.read(|r| r.credentials.len())
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Append a credential whose id is chosen by the store.
    ///
    /// The id is one past the highest id present, so ids are never reused.
    pub(crate) fn insert_with_next_id(
        &self,
        build: impl FnOnce(CredentialId) -> Credential,
    ) -> Result<Credential, CredentialError> {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let credential = build(records.next_id());
        records.push(credential.clone())?;
        Ok(credential)
    }

    fn read<T>(&self, f: impl FnOnce(&Records) -> T) -> T {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        f(&records)
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn find_by_id(&self, id: CredentialId) -> Result<Option<Credential>, CredentialError> {
        Ok(self.read(|r| r.by_id.get(&id).map(|&idx| r.credentials[idx].clone())))
    }

    fn find_by_address(
        &self,
        address: &HolderAddress,
    ) -> Result<Option<Credential>, CredentialError> {
        Ok(self.read(|r| {
            r.credentials
                .iter()
                .find(|c| &c.holder_address == address)
                .cloned()
        }))
    }
}
