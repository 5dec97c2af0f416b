//! Configuration management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hopfetch_fetch::{DEFAULT_MAX_REDIRECTS, FetchSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Fetch configuration read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum redirects followed per fetch.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    /// Per-attempt timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Custom user agent.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Domains fetches may connect to.
    #[serde(default)]
    pub allowed_domains: Option<Vec<String>>,
    /// Whether to honor proxy environment variables.
    #[serde(default = "default_true")]
    pub system_proxy: bool,
}

fn default_max_redirects() -> u32 {
    DEFAULT_MAX_REDIRECTS
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_redirects: default_max_redirects(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            allowed_domains: None,
            system_proxy: true,
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hopfetch")
            .join("config.json")
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Converts the file configuration into fetch settings.
    pub fn into_settings(self) -> FetchSettings {
        let mut settings = FetchSettings::default()
            .with_max_redirects(self.max_redirects)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_system_proxy(self.system_proxy);
        if let Some(user_agent) = self.user_agent {
            settings = settings.with_user_agent(user_agent);
        }
        if let Some(domains) = self.allowed_domains {
            settings = settings.with_allowed_domains(domains);
        }
        settings
    }
}
