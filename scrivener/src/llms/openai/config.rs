//! OpenAI-compatible client configuration.

use crate::credentials::{Credentials, ProviderKind};
use crate::error::Result;

/// Configuration for the OpenAI-compatible client.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Resolved key, endpoint and provider.
    pub credentials: Credentials,
    /// Default model to use.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl OpenAIConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Creates a configuration from already-resolved credentials.
    ///
    /// The model defaults to the one the credentials' provider serves.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            model: credentials.provider.default_model().to_owned(),
            credentials,
            timeout_secs: Some(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// See [`Credentials::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialMissing`](crate::Error::CredentialMissing)
    /// when no API key is set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Credentials::from_env()?))
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.credentials.base_url = url.into();
        self
    }

    /// Sets the default model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// The provider the credentials belong to.
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        self.credentials.provider
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = OpenAIConfig::new(Credentials::new(ProviderKind::DeepSeek, "test-key"));
        assert_eq!(config.credentials.api_key, "test-key");
        assert_eq!(config.credentials.base_url, "https://api.deepseek.com");
        assert_eq!(config.model, "deepseek-chat");
        assert_eq!(config.timeout_secs, Some(120));
    }

    #[test]
    fn test_openai_key_gets_openai_model() {
        let creds = Credentials::from_lookup(|name| {
            (name == crate::credentials::OPENAI_API_KEY).then(|| "sk-oa".to_owned())
        })
        .unwrap();
        let config = OpenAIConfig::new(creds);
        assert_eq!(config.provider(), ProviderKind::OpenAI);
        assert_eq!(config.credentials.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn test_config_builder() {
        let config = OpenAIConfig::new(Credentials::new(ProviderKind::OpenAI, "key"))
            .with_model("gpt-4o")
            .with_base_url("http://localhost:8080/v1")
            .with_timeout(60);

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.credentials.base_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout_secs, Some(60));
        assert_eq!(config.provider(), ProviderKind::OpenAI);
    }
}
