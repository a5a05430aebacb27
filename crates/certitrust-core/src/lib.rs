//! CertiTrust Core — credential records, identifiers, and the fixture
//! file format shared by the verification engine and the CLI.

pub mod error;
pub mod fixture;
pub mod types;

pub use error::CoreError;
pub use fixture::FixtureFile;
pub use types::{Credential, CredentialId, CredentialStatus, CredentialSummary, HolderAddress};
