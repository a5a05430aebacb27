use std::path::PathBuf;
use std::sync::Arc;

use certitrust_verify::InMemoryCredentialStore;

/// Resolved state shared by every command.
pub struct Context {
    pub store: Arc<InMemoryCredentialStore>,
    /// Fixture file the store was seeded from, if any.
    pub fixtures: Option<PathBuf>,
    /// Print results as JSON.
    pub json: bool,
}
