#![allow(dead_code)]

use reqwest::{Client, RequestBuilder};
use std::time::Duration;

use crate::providers::error::ProviderError;
use crate::providers::types::ApiKey;

const USER_AGENT: &str = concat!("llmq/", env!("CARGO_PKG_VERSION"));

/// Transport settings. Every request is sent exactly once; timeouts are
/// opt-in and there is no retry layer.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    config: HttpConfig,
}

impl HttpClient {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(HttpConfig::default())
    }

    pub fn with_config(config: HttpConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder().user_agent(&config.user_agent);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            ProviderError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            inner: client,
            config,
        })
    }

    #[must_use]
    pub fn post(&self, url: &str, auth: &AuthStrategy) -> RequestBuilder {
        auth.apply(self.inner.post(url))
    }

    #[must_use]
    pub fn get(&self, url: &str, auth: &AuthStrategy) -> RequestBuilder {
        auth.apply(self.inner.get(url))
    }

    #[must_use]
    pub const fn inner(&self) -> &Client {
        &self.inner
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// How a provider expects its credential on the wire. GitHub Models and
/// OpenAI take a bearer token; Azure OpenAI wants a bare `api-key` header.
#[derive(Clone)]
pub enum AuthStrategy {
    Bearer(ApiKey),
    ApiKeyHeader {
        header_name: &'static str,
        key: ApiKey,
    },
    None,
}

impl AuthStrategy {
    #[must_use]
    pub const fn bearer(key: ApiKey) -> Self {
        Self::Bearer(key)
    }

    #[must_use]
    pub const fn azure(key: ApiKey) -> Self {
        Self::ApiKeyHeader {
            header_name: "api-key",
            key,
        }
    }

    #[must_use]
    pub const fn custom_header(header_name: &'static str, key: ApiKey) -> Self {
        Self::ApiKeyHeader { header_name, key }
    }

    #[must_use]
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Bearer(key) => {
                request.header("Authorization", format!("Bearer {}", key.as_str()))
            }
            Self::ApiKeyHeader { header_name, key } => request.header(*header_name, key.as_str()),
            Self::None => request,
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        match self {
            Self::Bearer(key) | Self::ApiKeyHeader { key, .. } => !key.is_empty(),
            Self::None => true,
        }
    }
}

impl std::fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(key) => f.debug_tuple("Bearer").field(key).finish(),
            Self::ApiKeyHeader { header_name, key } => f
                .debug_struct("ApiKeyHeader")
                .field("header_name", header_name)
                .field("key", key)
                .finish(),
            Self::None => write!(f, "None"),
        }
    }
}
