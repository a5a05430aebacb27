use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Store-scoped credential identifier. Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CredentialId(u64);

impl CredentialId {
    /// Create a credential id, rejecting zero.
    pub fn new(value: u64) -> Result<Self, CoreError> {
        if value == 0 {
            return Err(CoreError::InvalidCredentialId("0".into()));
        }
        Ok(Self(value))
    }

    /// Parse a raw user-supplied token. Surrounding whitespace is ignored.
    pub fn parse(token: &str) -> Result<Self, CoreError> {
        let trimmed = token.trim();
        let value: u64 = trimmed
            .parse()
            .map_err(|_| CoreError::InvalidCredentialId(trimmed.to_string()))?;
        Self::new(value)
    }

    /// The id given to the first credential of an empty store.
    pub fn first() -> Self {
        Self(1)
    }

    /// The raw integer value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl TryFrom<u64> for CredentialId {
    type Error = CoreError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CredentialId> for u64 {
    fn from(id: CredentialId) -> Self {
        id.0
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque wallet address of a credential holder.
///
/// Not unique across credentials: one learner may hold many.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolderAddress(String);

impl HolderAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for HolderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issuance status of a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialStatus {
    /// The issuer has confirmed the credential.
    #[serde(rename = "Verified")]
    Verified,
    /// Issued but not yet confirmed by the issuer.
    #[serde(rename = "Pending Verification")]
    PendingVerification,
}

impl CredentialStatus {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => write!(f, "Verified"),
            Self::PendingVerification => write!(f, "Pending Verification"),
        }
    }
}

/// A learner credential as recorded by its issuer. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: CredentialId,
    pub holder_address: HolderAddress,
    /// Issuing institution.
    pub issuer: String,
    /// Course or credential name.
    pub course: String,
    /// Completion date as recorded by the issuer (free-form, usually ISO 8601).
    pub date_completed: String,
    pub status: CredentialStatus,
    /// Full details require an explicit permission grant before disclosure.
    #[serde(default)]
    pub sensitive: bool,
}

impl Credential {
    /// The fields of this credential that may be shown without a grant.
    pub fn summary(&self) -> CredentialSummary {
        CredentialSummary {
            id: self.id,
            issuer: self.issuer.clone(),
            status: self.status,
        }
    }
}

/// Non-sensitive view of a credential, shown while disclosure is gated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSummary {
    pub id: CredentialId,
    pub issuer: String,
    pub status: CredentialStatus,
}
