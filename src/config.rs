use crate::common::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file, both locally and under `~/.fertilizer/`.
const CONFIG_FILE: &str = "fertilizer.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the prediction service.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// File that receives the application logs.
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

#[inline(always)]
#[rustfmt::skip]
fn default_api_url() -> String  { DEFAULT_API_URL.to_string() }
#[inline(always)]
#[rustfmt::skip]
fn default_log_file() -> String { "fertilizer-tui.log".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// Load config from either current directory or `~/.fertilizer/` directory
    pub fn load() -> color_eyre::Result<Self> {
        // try current directory first
        let local_path = PathBuf::from(CONFIG_FILE);
        if local_path.exists() {
            return Self::load_from(&local_path);
        }

        let home_path = Self::home_config_path();
        if home_path.exists() {
            return Self::load_from(&home_path);
        }

        // if neither exists, create default config in current directory
        let config = Self::default();
        config.save_to(&local_path)?;
        Ok(config)
    }

    /// Read config from the given JSON file.
    pub fn load_from(path: &Path) -> color_eyre::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Write config as pretty JSON, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Save config where it will be found on the next start: the local file if
    /// there is one, `~/.fertilizer/` otherwise.
    pub fn save(&self) -> color_eyre::Result<()> {
        let local_path = PathBuf::from(CONFIG_FILE);
        if local_path.exists() {
            self.save_to(&local_path)
        } else {
            self.save_to(&Self::home_config_path())
        }
    }

    /// Get the path to `$HOME/.fertilizer/fertilizer.json`
    ///
    /// FIXME: this is not cross-platform
    fn home_config_path() -> PathBuf {
        let mut path = match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home),
            Err(_) => PathBuf::from("."),
        };
        path.push(".fertilizer");
        path.push(CONFIG_FILE);
        path
    }

    /// Get the current config location (for display purposes)
    pub fn current_location() -> String {
        let local_path = PathBuf::from(CONFIG_FILE);
        if local_path.exists() {
            return format!("./{}", CONFIG_FILE);
        }

        let home_path = Self::home_config_path();
        if home_path.exists() {
            return home_path.to_string_lossy().to_string();
        }

        format!("./{} (not found)", CONFIG_FILE)
    }
}
