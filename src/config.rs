//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Backend URL used when neither the config file nor the environment
/// provides one
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:54321";

/// User configuration for the TUI
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Backend service URL
    pub backend_url: Option<String>,
    /// API key sent with every backend request
    pub api_key: Option<String>,
    /// Access token of the signed-in owner account
    pub access_token: Option<String>,
    /// Pre-filled city for the address step
    pub default_city: Option<String>,
    /// Pre-filled province for the address step
    pub default_province: Option<String>,
    /// Pre-filled region for the address step
    pub default_region: Option<String>,
}

#[allow(dead_code)]
impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("ph", "vfire", "vfire-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Effective backend URL. `VFIRE_BACKEND_URL` overrides the config
    /// file; both fall back to the local development default.
    pub fn backend_url(&self) -> String {
        std::env::var("VFIRE_BACKEND_URL")
            .ok()
            .or_else(|| self.backend_url.clone())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
    }
}
