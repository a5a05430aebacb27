//! TOML fixture files used to seed a credential store.
//!
//! ```toml
//! [[credentials]]
//! id = 1
//! holder_address = "0xABC123"
//! issuer = "University of Technology"
//! course = "Bachelor of Science in Computer Science"
//! date_completed = "2021-06-15"
//! status = "Verified"
//! sensitive = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CoreError;
use crate::types::Credential;

/// A set of credential records in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureFile {
    #[serde(default)]
    pub credentials: Vec<Credential>,
}

impl FixtureFile {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CoreError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> Result<String, CoreError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read a fixture file. Unlike configuration, a missing fixture is an error.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let contents = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}
