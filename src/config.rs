//! Component configuration

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::keys::CommitKey;

/// Text an untouched control shows; treated the same as an empty answer
pub const DEFAULT_PLACEHOLDER: &str = "enter your answer";

/// Answer-entry configuration file structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Placeholder text that never counts as a real answer
    pub placeholder: String,
    /// Key that commits a typed answer
    pub commit_key: CommitKey,
    /// Buffer size of the outbound event bus
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            commit_key: CommitKey::Enter,
            event_capacity: 16,
        }
    }
}

impl Config {
    /// Load config from a TOML file, falling back to defaults if it is missing
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("config not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        tracing::info!(
            commit_key = ?config.commit_key,
            "loaded config from {}",
            path.display()
        );

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Returns true if `value` carries no real answer
    pub fn is_blank(&self, value: &str) -> bool {
        value.is_empty() || value == self.placeholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.placeholder, "enter your answer");
        assert_eq!(config.commit_key, CommitKey::Enter);
        assert_eq!(config.event_capacity, 16);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(r#"commit_key = "tab""#).unwrap();
        assert_eq!(config.commit_key, CommitKey::Tab);
        assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_bad_toml() {
        assert!(Config::from_toml(r#"commit_key = "space""#).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("/definitely/not/here/config.toml").unwrap();
        assert_eq!(config.event_capacity, 16);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("duel-input-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "placeholder = \"type here\"\nevent_capacity = 4\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.placeholder, "type here");
        assert_eq!(config.event_capacity, 4);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_is_blank() {
        let config = Config::default();
        assert!(config.is_blank(""));
        assert!(config.is_blank("enter your answer"));
        assert!(!config.is_blank(" "));
        assert!(!config.is_blank("Paris"));
    }
}
