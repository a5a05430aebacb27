//! CLI configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Full configuration for the `certitrust` CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CertiTrustConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Credential store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// TOML fixture file to seed the store from. The built-in demo
    /// credentials are used when unset.
    #[serde(default)]
    pub fixtures: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Print results as JSON instead of text.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "warn".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl CertiTrustConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: CertiTrustConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CertiTrustConfig::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "text");
        assert!(!config.logging.is_json());
        assert!(config.store.fixtures.is_none());
        assert!(!config.output.json);
    }

    #[test]
    fn test_config_load_nonexistent_uses_defaults() {
        let config = CertiTrustConfig::load(Path::new("/nonexistent/certitrust.toml")).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_from_toml_partial() {
        let toml_str = r#"
[store]
fixtures = "data/credentials.toml"

[logging]
format = "json"
"#;
        let config: CertiTrustConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(
            config.store.fixtures,
            Some(PathBuf::from("data/credentials.toml"))
        );
        assert!(config.logging.is_json());
        // Defaults for unspecified
        assert_eq!(config.logging.level, "warn");
        assert!(!config.output.json);
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf/certitrust.toml");
        let mut config = CertiTrustConfig::default();
        config.output.json = true;
        config.logging.level = "debug".into();
        config.save(&path).unwrap();

        let loaded = CertiTrustConfig::load(&path).unwrap();
        assert!(loaded.output.json);
        assert_eq!(loaded.logging.level, "debug");
    }
}
