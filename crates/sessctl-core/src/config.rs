//! Configuration management for sessctl.
//!
//! Loads configuration from ${SESSCTL_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the auth server.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Default auth server address (the demo server's bind address).
    pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the effective base URL.
    ///
    /// Resolution order:
    /// 1. `override_url` (CLI flag or `SESSCTL_BASE_URL` env var)
    /// 2. the configured `base_url`
    ///
    /// Trailing slashes are stripped so endpoint paths can be appended.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> String {
        let raw = match override_url {
            Some(value) if !value.trim().is_empty() => value,
            _ => &self.base_url,
        };
        raw.trim().trim_end_matches('/').to_string()
    }

    /// Writes a default config file at the standard path if none exists.
    /// Returns true if a file was created.
    pub fn init() -> Result<bool> {
        Self::init_at(&paths::config_path())
    }

    /// Writes a default config file at a specific path if none exists.
    pub fn init_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(true)
    }
}

/// Default config.toml contents, kept commented so defaults stay visible.
fn default_config_template() -> &'static str {
    "# sessctl configuration\n\
     #\n\
     # Base URL of the auth server. Can be overridden with SESSCTL_BASE_URL\n\
     # or the --base-url flag.\n\
     base_url = \"http://localhost:5000\"\n"
}

pub mod paths {
    //! Path resolution for sessctl configuration and data files.
    //!
    //! SESSCTL_HOME resolution order:
    //! 1. SESSCTL_HOME environment variable (if set)
    //! 2. ~/.config/sessctl (default)

    use std::path::PathBuf;

    /// Returns the sessctl home directory.
    ///
    /// Checks SESSCTL_HOME env var first, falls back to ~/.config/sessctl
    pub fn sessctl_home() -> PathBuf {
        if let Ok(home) = std::env::var("SESSCTL_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("sessctl"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        sessctl_home().join("config.toml")
    }

    /// Returns the path to the durable session file.
    pub fn session_path() -> PathBuf {
        sessctl_home().join("session.json")
    }
}
