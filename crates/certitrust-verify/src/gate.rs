use std::collections::BTreeSet;
use std::fmt;

use dashmap::DashSet;

use certitrust_core::{Credential, CredentialId};

/// Whether a credential's full details may be shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Disclose,
    RequirePermission,
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disclose => write!(f, "disclose"),
            Self::RequirePermission => write!(f, "require_permission"),
        }
    }
}

/// Access control gate for sensitive credentials.
///
/// Grants are keyed by credential id only: every caller sharing a gate
/// shares its grants. Grants never expire and are never withdrawn.
pub struct AccessGate {
    grants: DashSet<CredentialId>,
}

impl AccessGate {
    /// Create a gate with no grants.
    pub fn new() -> Self {
        Self {
            grants: DashSet::new(),
        }
    }

    /// Decide whether `credential` may be disclosed in full.
    pub fn evaluate(&self, credential: &Credential) -> AccessDecision {
        if !credential.sensitive || self.grants.contains(&credential.id) {
            AccessDecision::Disclose
        } else {
            AccessDecision::RequirePermission
        }
    }

    /// Grant disclosure of a credential. Idempotent.
    ///
    /// Returns `true` if the grant is new.
    pub fn grant(&self, id: CredentialId) -> bool {
        let added = self.grants.insert(id);
        if added {
            tracing::info!(credential_id = %id, "disclosure permission granted");
        }
        added
    }

    /// Check if disclosure of `id` has been granted.
    pub fn is_granted(&self, id: CredentialId) -> bool {
        self.grants.contains(&id)
    }

    /// Snapshot of granted ids, ascending.
    pub fn grants(&self) -> BTreeSet<CredentialId> {
        self.grants.iter().map(|e| *e.key()).collect()
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new()
    }
}
