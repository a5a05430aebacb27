use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

use certitrust_core::{Credential, CredentialId, CredentialStatus, CredentialSummary};

use crate::error::CredentialError;
use crate::gate::{AccessDecision, AccessGate};
use crate::history::{AuditHistory, VerificationAttempt, VerificationOutcome};
use crate::query::{LookupKey, VerificationQuery};
use crate::store::CredentialStore;

/// Result of a single-credential verification.
///
/// Every variant is a normal answer the caller renders; none is an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationResult {
    /// Disclosed and verified by the issuer.
    Valid { credential: Credential },
    /// Disclosed, issuer verification still pending.
    Pending { credential: Credential },
    /// No credential matches the query.
    NotFound,
    /// The credential is sensitive and no grant exists for it yet.
    PermissionRequired { summary: CredentialSummary },
    /// Neither an id nor an address was supplied.
    InvalidQuery,
    /// The store failed to answer.
    LookupFailed { reason: String },
}

impl VerificationResult {
    /// The audit outcome this result classifies as, if any.
    pub fn outcome(&self) -> Option<VerificationOutcome> {
        match self {
            Self::Valid { .. } => Some(VerificationOutcome::Valid),
            Self::Pending { .. } => Some(VerificationOutcome::Pending),
            Self::NotFound => Some(VerificationOutcome::NotFound),
            Self::PermissionRequired { .. } => Some(VerificationOutcome::PermissionRequired),
            Self::LookupFailed { .. } => Some(VerificationOutcome::LookupFailed),
            Self::InvalidQuery => None,
        }
    }

    /// The fully disclosed credential, present only for `Valid` and `Pending`.
    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Valid { credential } | Self::Pending { credential } => Some(credential),
            _ => None,
        }
    }
}

/// Status column of a batch triage result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchStatus {
    #[serde(rename = "Verified")]
    Verified,
    #[serde(rename = "Pending Verification")]
    PendingVerification,
    #[serde(rename = "Not Found")]
    NotFound,
    #[serde(rename = "Lookup Failed")]
    LookupFailed,
}

impl From<CredentialStatus> for BatchStatus {
    fn from(status: CredentialStatus) -> Self {
        match status {
            CredentialStatus::Verified => Self::Verified,
            CredentialStatus::PendingVerification => Self::PendingVerification,
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => write!(f, "Verified"),
            Self::PendingVerification => write!(f, "Pending Verification"),
            Self::NotFound => write!(f, "Not Found"),
            Self::LookupFailed => write!(f, "Lookup Failed"),
        }
    }
}

/// One row of a batch triage run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// The input token after trimming.
    pub query: String,
    pub status: BatchStatus,
    pub timestamp: DateTime<Utc>,
}

/// Orchestrates lookup, disclosure gating, classification, and auditing
/// for one employer session.
pub struct VerificationEngine {
    session_id: Uuid,
    store: Arc<dyn CredentialStore>,
    gate: AccessGate,
    history: AuditHistory,
    /// Replaced wholesale by each batch run.
    batch_results: RwLock<Vec<BatchResult>>,
}

impl VerificationEngine {
    /// Create an engine over `store` with no grants and an empty history.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let session_id = Uuid::now_v7();
        tracing::debug!(session = %session_id, "verification session opened");
        Self {
            session_id,
            store,
            gate: AccessGate::new(),
            history: AuditHistory::new(),
            batch_results: RwLock::new(Vec::new()),
        }
    }

    /// Identifier attached to this session's log events.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Verify a single credential by id or holder address.
    ///
    /// Not-found, disclosed, and failed lookups are appended to the audit
    /// history. Attempts stopped at the access gate and empty queries are
    /// not audited.
    pub fn verify_one(&self, query: &VerificationQuery) -> VerificationResult {
        let Some((key, query_text)) = query.resolve() else {
            tracing::debug!(session = %self.session_id, "verification query without id or address");
            return VerificationResult::InvalidQuery;
        };

        let credential = match self.lookup(&key) {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                self.record(query_text, VerificationOutcome::NotFound);
                return VerificationResult::NotFound;
            }
            Err(e) => {
                tracing::warn!(
                    session = %self.session_id,
                    query = %query_text,
                    error = %e,
                    "credential lookup failed"
                );
                self.record(query_text, VerificationOutcome::LookupFailed);
                return VerificationResult::LookupFailed {
                    reason: e.to_string(),
                };
            }
        };

        match self.gate.evaluate(&credential) {
            AccessDecision::RequirePermission => {
                tracing::debug!(
                    session = %self.session_id,
                    credential_id = %credential.id,
                    "sensitive credential withheld pending permission"
                );
                VerificationResult::PermissionRequired {
                    summary: credential.summary(),
                }
            }
            AccessDecision::Disclose => {
                let result = match credential.status {
                    CredentialStatus::Verified => VerificationResult::Valid { credential },
                    CredentialStatus::PendingVerification => {
                        VerificationResult::Pending { credential }
                    }
                };
                if let Some(outcome) = result.outcome() {
                    self.record(query_text, outcome);
                }
                result
            }
        }
    }

    /// Triage a list of raw id tokens, one result per token, in input order.
    ///
    /// Tokens are trimmed; tokens that are not positive integers report
    /// `Not Found`. The results replace the previous batch result set and
    /// are not added to the audit history.
    pub fn verify_batch<T: AsRef<str>>(&self, tokens: &[T]) -> Vec<BatchResult> {
        let results: Vec<BatchResult> = tokens
            .iter()
            .map(|token| {
                let key = LookupKey::from_id_token(token.as_ref());
                let status = match self.lookup(&key) {
                    Ok(Some(credential)) => triage_status(&credential),
                    Ok(None) => BatchStatus::NotFound,
                    Err(e) => {
                        tracing::warn!(
                            session = %self.session_id,
                            query = %key,
                            error = %e,
                            "batch lookup failed"
                        );
                        BatchStatus::LookupFailed
                    }
                };
                BatchResult {
                    query: token.as_ref().trim().to_string(),
                    status,
                    timestamp: Utc::now(),
                }
            })
            .collect();

        tracing::debug!(
            session = %self.session_id,
            count = results.len(),
            "batch verification complete"
        );
        *self
            .batch_results
            .write()
            .unwrap_or_else(PoisonError::into_inner) = results.clone();
        results
    }

    /// Triage a comma-separated list of ids.
    pub fn verify_batch_input(&self, raw: &str) -> Vec<BatchResult> {
        let tokens: Vec<&str> = raw.split(',').collect();
        self.verify_batch(&tokens)
    }

    /// Grant disclosure of a credential for the rest of the session.
    ///
    /// Idempotent; returns `true` if the grant is new.
    pub fn request_permission(&self, id: CredentialId) -> bool {
        self.gate.grant(id)
    }

    /// Snapshot of granted credential ids, ascending.
    pub fn grants(&self) -> BTreeSet<CredentialId> {
        self.gate.grants()
    }

    /// Audited attempts in call order.
    pub fn history(&self) -> Vec<VerificationAttempt> {
        self.history.all()
    }

    /// The most recent batch result set.
    pub fn batch_results(&self) -> Vec<BatchResult> {
        self.batch_results
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lookup(&self, key: &LookupKey) -> Result<Option<Credential>, CredentialError> {
        match key {
            LookupKey::Id(id) => self.store.find_by_id(*id),
            LookupKey::Address(address) => self.store.find_by_address(address),
            LookupKey::Malformed(_) => Ok(None),
        }
    }

    fn record(&self, query: String, outcome: VerificationOutcome) {
        self.history.append(VerificationAttempt::new(query, outcome));
    }
}

/// Batch triage reports issuance status only. It never consults the access
/// gate and never returns credential content, so sensitivity and grants
/// do not affect it; full disclosure goes through `verify_one`.
fn triage_status(credential: &Credential) -> BatchStatus {
    credential.status.into()
}
