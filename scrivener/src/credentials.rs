//! API credential resolution.
//!
//! Credentials are resolved once, before the first model call, and handed to
//! the client explicitly. A missing key is reported as
//! [`Error::CredentialMissing`] so a workflow never starts without one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable holding the DeepSeek API key (preferred).
pub const DEEPSEEK_API_KEY: &str = "DEEPSEEK_API_KEY";
/// Environment variable overriding the DeepSeek endpoint.
pub const DEEPSEEK_BASE_URL: &str = "DEEPSEEK_BASE_URL";
/// Environment variable holding the OpenAI API key (fallback).
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable overriding the OpenAI endpoint.
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";

/// Which OpenAI-compatible backend a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// DeepSeek (`https://api.deepseek.com`).
    DeepSeek,
    /// OpenAI (`https://api.openai.com/v1`).
    OpenAI,
}

impl ProviderKind {
    /// Provider label used in logs and errors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeepSeek => "deepseek",
            Self::OpenAI => "openai",
        }
    }

    /// Default endpoint for this provider.
    #[must_use]
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::DeepSeek => "https://api.deepseek.com",
            Self::OpenAI => "https://api.openai.com/v1",
        }
    }

    /// Model used when the configuration names none.
    #[must_use]
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::DeepSeek => "deepseek-chat",
            Self::OpenAI => "gpt-4o-mini",
        }
    }

    const fn base_url_var(self) -> &'static str {
        match self {
            Self::DeepSeek => DEEPSEEK_BASE_URL,
            Self::OpenAI => OPENAI_BASE_URL,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved API key and endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Bearer token.
    pub api_key: String,
    /// Endpoint the key is valid for.
    pub base_url: String,
    /// Backend the key belongs to.
    pub provider: ProviderKind,
}

impl Credentials {
    /// Create credentials for a provider's default endpoint.
    #[must_use]
    pub fn new(provider: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: provider.default_base_url().to_owned(),
            provider,
        }
    }

    /// Override the endpoint.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Resolve credentials from the process environment.
    ///
    /// Reads `DEEPSEEK_API_KEY` first and falls back to `OPENAI_API_KEY`.
    /// The endpoint comes from `DEEPSEEK_BASE_URL` or `OPENAI_BASE_URL`
    /// respectively, defaulting to the provider's public API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialMissing`] when neither key is set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialMissing`] when neither key is available.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let (provider, api_key) = if let Some(key) = non_blank(DEEPSEEK_API_KEY) {
            (ProviderKind::DeepSeek, key)
        } else if let Some(key) = non_blank(OPENAI_API_KEY) {
            (ProviderKind::OpenAI, key)
        } else {
            return Err(Error::credential_missing(format!(
                "set {DEEPSEEK_API_KEY} (recommended) or {OPENAI_API_KEY}"
            )));
        };

        let base_url = non_blank(provider.base_url_var())
            .unwrap_or_else(|| provider.default_base_url().to_owned());

        Ok(Self {
            api_key,
            base_url,
            provider,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("provider", &self.provider)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn prefers_deepseek_key() {
        let creds =
            Credentials::from_lookup(lookup(&[(DEEPSEEK_API_KEY, "ds"), (OPENAI_API_KEY, "oa")]))
                .unwrap();
        assert_eq!(creds.provider, ProviderKind::DeepSeek);
        assert_eq!(creds.api_key, "ds");
        assert_eq!(creds.base_url, "https://api.deepseek.com");
    }

    #[test]
    fn falls_back_to_openai() {
        let creds = Credentials::from_lookup(lookup(&[(OPENAI_API_KEY, "oa")])).unwrap();
        assert_eq!(creds.provider, ProviderKind::OpenAI);
        assert_eq!(creds.base_url, "https://api.openai.com/v1");
        assert_eq!(creds.provider.default_model(), "gpt-4o-mini");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let creds =
            Credentials::from_lookup(lookup(&[(DEEPSEEK_API_KEY, "  "), (OPENAI_API_KEY, "oa")]))
                .unwrap();
        assert_eq!(creds.provider, ProviderKind::OpenAI);
    }

    #[test]
    fn base_url_override() {
        let creds = Credentials::from_lookup(lookup(&[
            (DEEPSEEK_API_KEY, "ds"),
            (DEEPSEEK_BASE_URL, "http://localhost:8000/v1"),
        ]))
        .unwrap();
        assert_eq!(creds.base_url, "http://localhost:8000/v1");
    }

    #[test]
    fn missing_keys_fail_fast() {
        let err = Credentials::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::CredentialMissing(_)));
        assert!(err.to_string().contains(DEEPSEEK_API_KEY));
    }

    #[test]
    fn debug_redacts_key() {
        let creds = Credentials::new(ProviderKind::OpenAI, "sk-secret");
        let printed = format!("{creds:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("redacted"));
    }
}
