//! CertiTrust Verify — credential lookup, sensitive-disclosure gating,
//! audit history, batch triage, issuance, and issuer feedback.

pub mod engine;
pub mod error;
pub mod feedback;
pub mod gate;
pub mod history;
pub mod issuer;
pub mod query;
pub mod store;

pub use engine::{BatchResult, BatchStatus, VerificationEngine, VerificationResult};
pub use error::CredentialError;
pub use feedback::{FeedbackBook, IssuerFeedback};
pub use gate::{AccessDecision, AccessGate};
pub use history::{AuditHistory, VerificationAttempt, VerificationOutcome};
pub use issuer::{CredentialIssuer, NewCredential};
pub use query::{LookupKey, VerificationQuery};
pub use store::{CredentialStore, InMemoryCredentialStore};
