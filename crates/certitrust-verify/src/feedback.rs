//! Employer feedback on issuing institutions.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::CredentialError;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// The latest feedback left for one issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerFeedback {
    pub issuer: String,
    pub feedback: String,
    pub rating: u8,
    pub submitted_at: DateTime<Utc>,
}

/// Issuer name → latest feedback. A new submission replaces the old one.
pub struct FeedbackBook {
    entries: DashMap<String, IssuerFeedback>,
}

impl FeedbackBook {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Record feedback for `issuer`.
    pub fn submit(
        &self,
        issuer: &str,
        feedback: &str,
        rating: u8,
    ) -> Result<IssuerFeedback, CredentialError> {
        let issuer = issuer.trim();
        if issuer.is_empty() {
            return Err(CredentialError::InvalidFeedback("issuer is empty".into()));
        }
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(CredentialError::InvalidFeedback("feedback is empty".into()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(CredentialError::InvalidFeedback(format!(
                "rating {} outside {}..={}",
                rating, MIN_RATING, MAX_RATING
            )));
        }

        let entry = IssuerFeedback {
            issuer: issuer.to_string(),
            feedback: feedback.to_string(),
            rating,
            submitted_at: Utc::now(),
        };
        self.entries.insert(entry.issuer.clone(), entry.clone());
        tracing::info!(issuer = %entry.issuer, rating, "issuer feedback recorded");
        Ok(entry)
    }

    pub fn get(&self, issuer: &str) -> Option<IssuerFeedback> {
        self.entries.get(issuer.trim()).map(|e| e.clone())
    }

    /// All entries sorted by issuer name.
    pub fn entries(&self) -> Vec<IssuerFeedback> {
        let mut all: Vec<_> = self.entries.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.issuer.cmp(&b.issuer));
        all
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for FeedbackBook {
    fn default() -> Self {
        Self::new()
    }
}
