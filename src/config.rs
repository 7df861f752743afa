//! CLI configuration file handling
//!
//! The configuration lives at `<config dir>/corelink/config.toml` and is
//! entirely optional; every field has a default.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

/// Default cloud API endpoint
const DEFAULT_API_URL: &str = "https://api.corelink.example.com";

/// User configuration, merged with per-invocation CLI flags
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cloud API base URL
    pub api_url: String,
    /// Token this CLI authenticates with; marked `*` in listings
    pub access_token: Option<String>,
    /// Always prefix programmer invocations with sudo
    pub sudo_dfu: bool,
    /// Programmer executable override
    pub dfu_util: Option<String>,
    /// Bound on a single transfer, in seconds
    pub transfer_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            sudo_dfu: false,
            dfu_util: None,
            transfer_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load the configuration file, falling back to defaults when absent
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.is_file() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        let config: Config =
            toml::from_str(&raw).map_err(|e| format!("invalid config {}: {e}", path.display()))?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "corelink").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_missing_fields() {
        let config: Config = toml::from_str("sudo_dfu = true").unwrap();
        assert!(config.sudo_dfu);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.transfer_timeout_secs, None);
    }

    #[test]
    fn test_full_file_parses() {
        let config: Config = toml::from_str(
            r#"
            api_url = "https://staging.corelink.example.com"
            access_token = "123abc"
            sudo_dfu = false
            dfu_util = "/opt/dfu-util/bin/dfu-util"
            transfer_timeout_secs = 120
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://staging.corelink.example.com");
        assert_eq!(config.access_token.as_deref(), Some("123abc"));
        assert_eq!(config.dfu_util.as_deref(), Some("/opt/dfu-util/bin/dfu-util"));
        assert_eq!(config.transfer_timeout_secs, Some(120));
    }
}
