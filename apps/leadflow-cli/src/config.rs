//! CLI configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// API server URL
    pub api_url: Option<String>,
    /// API authentication key
    pub api_key: Option<String>,
    /// Default output format
    pub output_format: Option<String>,
}

impl CliConfig {
    /// Load configuration from the default path
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get the default configuration file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("leadflow").join("config.toml"))
    }

    /// Get a configuration value
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_url" => self.api_url.clone(),
            "api_key" => self.api_key.clone(),
            "output_format" => self.output_format.clone(),
            _ => None,
        }
    }

    /// Set a configuration value
    pub fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        match key {
            "api_url" => self.api_url = Some(value),
            "api_key" => self.api_key = Some(value),
            "output_format" => self.output_format = Some(value),
            _ => anyhow::bail!("Unknown configuration key: {key}"),
        }
        Ok(())
    }

    /// Merge with command line options
    pub fn with_overrides(
        &self,
        api_url: Option<&str>,
        api_key: Option<&str>,
    ) -> (String, Option<String>) {
        let url = api_url
            .map(String::from)
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| "http://localhost:5000".to_string());

        let key = api_key.map(String::from).or_else(|| self.api_key.clone());

        (url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_round_trip() {
        let mut config = CliConfig::default();
        config
            .set("api_url", "http://example.com".to_string())
            .unwrap();

        assert_eq!(config.get("api_url").as_deref(), Some("http://example.com"));
        assert!(config.get("api_key").is_none());
        assert!(config.set("bogus", "x".to_string()).is_err());
    }

    #[test]
    fn flags_take_precedence_over_stored_values() {
        let config = CliConfig {
            api_url: Some("http://stored.example.com".to_string()),
            api_key: Some("stored-key".to_string()),
            output_format: None,
        };

        let (url, key) = config.with_overrides(Some("http://flag.example.com"), None);
        assert_eq!(url, "http://flag.example.com");
        assert_eq!(key.as_deref(), Some("stored-key"));

        let (url, _) = CliConfig::default().with_overrides(None, None);
        assert_eq!(url, "http://localhost:5000");
    }
}
