use std::sync::Arc;

use certitrust_core::{Credential, CredentialStatus, HolderAddress};

use crate::error::CredentialError;
use crate::store::InMemoryCredentialStore;

/// Request to issue a credential to a learner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub holder_address: HolderAddress,
    pub course: String,
    pub date_completed: String,
    pub status: CredentialStatus,
    pub sensitive: bool,
}

impl NewCredential {
    /// A non-sensitive request awaiting issuer verification.
    pub fn new(
        holder_address: impl Into<String>,
        course: impl Into<String>,
        date_completed: impl Into<String>,
    ) -> Self {
        Self {
            holder_address: HolderAddress::new(holder_address),
            course: course.into(),
            date_completed: date_completed.into(),
            status: CredentialStatus::PendingVerification,
            sensitive: false,
        }
    }

    /// Mark the credential as already verified by the issuer.
    pub fn verified(mut self) -> Self {
        self.status = CredentialStatus::Verified;
        self
    }

    /// Require a permission grant before its details are disclosed.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Issues credentials on behalf of one institution into a store.
pub struct CredentialIssuer {
    institution: String,
    store: Arc<InMemoryCredentialStore>,
}

impl CredentialIssuer {
    pub fn new(institution: impl Into<String>, store: Arc<InMemoryCredentialStore>) -> Self {
        Self {
            institution: institution.into(),
            store,
        }
    }

    /// Name of the issuing institution.
    pub fn institution(&self) -> &str {
        &self.institution
    }

    /// Issue a credential. The store assigns the next id.
    pub fn issue(&self, request: NewCredential) -> Result<Credential, CredentialError> {
        if self.institution.trim().is_empty() {
            return Err(CredentialError::IssuanceFailed(
                "issuer institution is empty".into(),
            ));
        }
        if request.holder_address.is_blank() {
            return Err(CredentialError::IssuanceFailed(
                "holder address is empty".into(),
            ));
        }
        if request.course.trim().is_empty() {
            return Err(CredentialError::IssuanceFailed("course is empty".into()));
        }

        let issued = self.store.insert_with_next_id(|id| Credential {
            id,
            holder_address: request.holder_address,
            issuer: self.institution.clone(),
            course: request.course,
            date_completed: request.date_completed,
            status: request.status,
            sensitive: request.sensitive,
        })?;

        tracing::info!(
            issuer = %self.institution,
            holder = %issued.holder_address,
            credential_id = %issued.id,
            sensitive = issued.sensitive,
            "credential issued"
        );

        Ok(issued)
    }
}
