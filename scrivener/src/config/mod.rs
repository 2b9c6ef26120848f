//! Configuration management.
//!
//! Settings are loaded from:
//! 1. Default values
//! 2. Config file (`~/.scrivener/config.toml`)
//!
//! Credentials never live in the file; see [`crate::credentials`].

mod schema;

pub use schema::{
    AgentProfile, AgentsSettings, ConfigIssue, IssueLevel, ProviderSettings, RetryPolicy,
    Settings, WorkflowSettings,
};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Error;

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// Validation found at least one error-level issue.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Get the default config directory path.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".scrivener")
}

/// Get the default config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

impl Settings {
    /// Parse settings from TOML text and reject error-level issues.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or when [`Settings::validate`] reports an error.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let settings = Self::parse_toml(content)?;
        settings.ensure_valid()?;
        Ok(settings)
    }

    /// Parse settings from TOML text without validating them.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML.
    pub fn parse_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render the settings as TOML.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Return an error listing every error-level issue, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when validation finds errors.
    pub fn ensure_valid(&self) -> ConfigResult<()> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(ConfigIssue::is_error)
            .map(|issue| issue.to_string())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors.join("; ")))
        }
    }

    /// Load settings from the default path.
    ///
    /// # Errors
    ///
    /// See [`Settings::load_from`].
    pub async fn load() -> ConfigResult<Self> {
        Self::load_from(config_path()).await
    }

    /// Load settings from a specific path. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is malformed, or is invalid.
    pub async fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let settings = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded config file");

        Ok(settings)
    }

    /// Save settings to a specific path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails when serialization or the write fails.
    pub async fn save_to(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(path, self.to_toml_string()?).await?;
        info!(path = %path.display(), "saved config file");

        Ok(())
    }
}
