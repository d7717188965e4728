#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use super::error::ProviderError;

/// Credential material. Never printed in full: `Debug` redacts the body.
#[derive(Clone)]
pub struct ApiKey(Cow<'static, str>);

impl ApiKey {
    #[must_use]
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self(key.into())
    }

    pub fn from_env(var_name: &str) -> Result<Self, ProviderError> {
        std::env::var(var_name)
            .map(|s| Self(Cow::Owned(s)))
            .map_err(|_| {
                ProviderError::Configuration(format!(
                    "{var_name} environment variable is not set"
                ))
            })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.len();
        if len > 8 {
            write!(f, "ApiKey({}...{})", &self.0[..4], &self.0[len - 3..])
        } else if len > 0 {
            write!(f, "ApiKey(***)")
        } else {
            write!(f, "ApiKey(<empty>)")
        }
    }
}

impl Default for ApiKey {
    fn default() -> Self {
        Self(Cow::Borrowed(""))
    }
}

/// Model identifier, or the deployment name for Azure OpenAI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(Cow<'static, str>);

impl ModelId {
    #[must_use]
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self(Cow::Borrowed(""))
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self(Cow::Owned(id.to_string()))
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

/// Normalized base URL with the trailing slash stripped, so `join`
/// always produces exactly one separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Cow<'static, str>);

impl BaseUrl {
    #[must_use]
    pub fn new(url: impl Into<Cow<'static, str>>) -> Self {
        let url = url.into();
        let url = if url.ends_with('/') {
            Cow::Owned(url.trim_end_matches('/').to_string())
        } else {
            url
        };
        Self(url)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Cow::Borrowed(""))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BaseUrl {
    fn from(url: &str) -> Self {
        Self::new(url.to_string())
    }
}

impl From<String> for BaseUrl {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}
