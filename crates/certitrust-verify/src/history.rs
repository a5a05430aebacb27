//! Append-only audit log of verification attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Classified outcome of a single verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationOutcome {
    /// Found, disclosed, and verified by its issuer.
    Valid,
    /// Found and disclosed, verification still pending.
    Pending,
    NotFound,
    /// Found, but sensitive and not yet granted.
    PermissionRequired,
    /// The store could not answer.
    LookupFailed,
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "Valid"),
            Self::Pending => write!(f, "Pending"),
            Self::NotFound => write!(f, "Not Found"),
            Self::PermissionRequired => write!(f, "Permission Required"),
            Self::LookupFailed => write!(f, "Lookup Failed"),
        }
    }
}

/// One audited lookup call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationAttempt {
    /// The id or address as the caller supplied it, trimmed (`"02"` stays `"02"`).
    pub query: String,
    pub outcome: VerificationOutcome,
    pub timestamp: DateTime<Utc>,
}

impl VerificationAttempt {
    pub fn new(query: impl Into<String>, outcome: VerificationOutcome) -> Self {
        Self {
            query: query.into(),
            outcome,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only history. Insertion order is chronological order.
///
/// There is no removal and no retention bound.
pub struct AuditHistory {
    entries: RwLock<Vec<VerificationAttempt>>,
}

impl AuditHistory {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append an attempt and return it as stored.
    ///
    /// A timestamp earlier than the previous entry's (wall clock stepping
    /// backwards) is raised to the previous one, keeping timestamps
    /// non-decreasing.
    pub fn append(&self, mut entry: VerificationAttempt) -> VerificationAttempt {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(last) = entries.last() {
            if entry.timestamp < last.timestamp {
                entry.timestamp = last.timestamp;
            }
        }
        tracing::debug!(
            query = %entry.query,
            outcome = %entry.outcome,
            position = entries.len(),
            "verification attempt recorded"
        );
        entries.push(entry.clone());
        entry
    }

    /// Snapshot of every attempt in call order.
    pub fn all(&self) -> Vec<VerificationAttempt> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AuditHistory {
    fn default() -> Self {
        Self::new()
    }
}
