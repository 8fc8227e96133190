use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "RTPKG_CONFIG";

/// Keys accepted by `Config::get` / `Config::set`
pub const KNOWN_KEYS: &[&str] = &["profile", "format", "output"];

/// Errors that can occur while loading or saving the CLI configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key: {0}. Supported keys: profile, format, output")]
    UnknownKey(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Path to a runtime profile TOML used instead of the built-in profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Default render format for `declare`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Default output path for `declare`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl Config {
    pub fn path() -> PathBuf {
        // Explicit override for tests and isolated runs
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        #[cfg(not(target_os = "windows"))]
        {
            dirs::home_dir().map_or_else(
                || PathBuf::from(".config/rtpkg/rtpkg.toml"),
                |h| h.join(".config").join("rtpkg").join("rtpkg.toml"),
            )
        }

        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map_or_else(
                || PathBuf::from("rtpkg\\rtpkg.toml"),
                |c| c.join("rtpkg").join("rtpkg.toml"),
            )
        }
    }

    /// Load config from the default location, returning an empty config if the file doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::path())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "profile" => self.profile.clone(),
            "format" => self.format.clone(),
            "output" => self.output.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "profile" => self.profile = Some(value),
            "format" => self.format = Some(value),
            "output" => self.output = Some(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.profile.is_none() && self.format.is_none() && self.output.is_none()
    }

    pub fn values_iter(&self) -> Vec<(&str, String)> {
        KNOWN_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}
