use certitrust_core::CredentialId;

/// Credential system errors.
///
/// Lookup misses and gated disclosure are verification outcomes, not
/// errors; see [`crate::VerificationResult`].
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("duplicate credential id: {0}")]
    DuplicateCredential(CredentialId),

    #[error("issuance failed: {0}")]
    IssuanceFailed(String),

    #[error("invalid feedback: {0}")]
    InvalidFeedback(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("core error: {0}")]
    Core(#[from] certitrust_core::CoreError),
}
