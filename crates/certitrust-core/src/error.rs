/// Core domain errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid credential id: {0:?} (expected a positive integer)")]
    InvalidCredentialId(String),

    #[error("fixture parse error: {0}")]
    FixtureParse(#[from] toml::de::Error),

    #[error("fixture encode error: {0}")]
    FixtureEncode(#[from] toml::ser::Error),

    #[error("fixture io error: {0}")]
    Io(#[from] std::io::Error),
}
