use tracing::warn;

use crate::providers::error::ProviderError;
use crate::providers::factory::ProviderKind;
use crate::providers::http::AuthStrategy;
use crate::providers::types::{ApiKey, BaseUrl, ModelId};

pub const GITHUB_BASE_URL: &str = "https://models.github.ai/inference";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_AZURE_API_VERSION: &str = "2023-12-01-preview";

const AZURE_ENDPOINT_PLACEHOLDER: &str = "your-azure-endpoint";

#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderCapabilities {
    pub vision: bool,
    pub json_mode: bool,
}

/// Everything that differs between the three providers: request routing,
/// auth, and the model used when the caller does not pick one.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: BaseUrl,
    pub auth: AuthStrategy,
    pub default_model: ModelId,
    pub api_key_env: &'static str,
    pub api_version: Option<String>,
    pub capabilities: ProviderCapabilities,
}

impl ProviderConfig {
    #[must_use]
    pub fn github(token: ApiKey) -> Self {
        Self {
            kind: ProviderKind::Github,
            base_url: BaseUrl::new(GITHUB_BASE_URL),
            auth: AuthStrategy::bearer(token),
            default_model: ModelId::new("openai/gpt-4o"),
            api_key_env: "GITHUB_TOKEN",
            api_version: None,
            capabilities: ProviderCapabilities {
                vision: true,
                json_mode: true,
            },
        }
    }

    #[must_use]
    pub fn azure(
        endpoint: impl Into<BaseUrl>,
        api_key: ApiKey,
        api_version: impl Into<String>,
    ) -> Self {
        let base_url = endpoint.into();
        if base_url.as_str().contains(AZURE_ENDPOINT_PLACEHOLDER) {
            warn!(
                endpoint = %base_url,
                "AZURE_ENDPOINT looks like a placeholder; set it to your Azure OpenAI resource URL"
            );
        }
        Self {
            kind: ProviderKind::Azure,
            base_url,
            auth: AuthStrategy::azure(api_key),
            default_model: ModelId::new("gpt-4o"),
            api_key_env: "AZURE_API_KEY",
            api_version: Some(api_version.into()),
            capabilities: ProviderCapabilities {
                vision: true,
                json_mode: true,
            },
        }
    }

    #[must_use]
    pub fn local(api_key: ApiKey) -> Self {
        Self {
            kind: ProviderKind::Local,
            base_url: BaseUrl::new(OPENAI_BASE_URL),
            auth: AuthStrategy::bearer(api_key),
            default_model: ModelId::new("gpt-4o"),
            api_key_env: "OPENAI_API_KEY",
            api_version: None,
            capabilities: ProviderCapabilities {
                vision: true,
                json_mode: true,
            },
        }
    }

    /// Builds the configuration for `kind` from the process environment.
    /// Fails naming the first missing required variable.
    pub fn from_env(kind: ProviderKind) -> Result<Self, ProviderError> {
        match kind {
            ProviderKind::Github => {
                let token = ApiKey::from_env("GITHUB_TOKEN")?;
                Ok(Self::github(token))
            }
            ProviderKind::Azure => {
                let endpoint = std::env::var("AZURE_ENDPOINT").map_err(|_| {
                    ProviderError::Configuration(
                        "AZURE_ENDPOINT environment variable is not set".to_string(),
                    )
                })?;
                let api_key = ApiKey::from_env("AZURE_API_KEY")?;
                let api_version = std::env::var("AZURE_API_VERSION")
                    .unwrap_or_else(|_| DEFAULT_AZURE_API_VERSION.to_string());
                Ok(Self::azure(endpoint, api_key, api_version))
            }
            ProviderKind::Local => {
                let api_key = ApiKey::from_env("OPENAI_API_KEY")?;
                Ok(Self::local(api_key))
            }
        }
    }

    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<ModelId>) -> Self {
        self.default_model = model.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture;

    #[test]
    fn test_github_config() {
        let config = ProviderConfig::github(ApiKey::new("ghp_test"));

        assert_eq!(config.kind, ProviderKind::Github);
        assert_eq!(config.base_url.as_str(), "https://models.github.ai/inference");
        assert_eq!(config.default_model.as_str(), "openai/gpt-4o");
        assert_eq!(config.api_key_env, "GITHUB_TOKEN");
        assert!(config.api_version.is_none());
        assert!(matches!(config.auth, AuthStrategy::Bearer(_)));
    }

    #[test]
    fn test_azure_config() {
        let config = ProviderConfig::azure(
            "https://myresource.openai.azure.com/",
            ApiKey::new("azure-key"),
            DEFAULT_AZURE_API_VERSION,
        );

        assert_eq!(config.kind, ProviderKind::Azure);
        assert_eq!(config.base_url.as_str(), "https://myresource.openai.azure.com");
        assert_eq!(config.default_model.as_str(), "gpt-4o");
        assert_eq!(config.api_key_env, "AZURE_API_KEY");
        assert_eq!(config.api_version.as_deref(), Some("2023-12-01-preview"));
        assert!(matches!(
            config.auth,
            AuthStrategy::ApiKeyHeader {
                header_name: "api-key",
                ..
            }
        ));
    }

    #[test]
    fn test_azure_placeholder_endpoint_warns() {
        let (guard, logs) = capture::install("llmq=info");
        let _real = ProviderConfig::azure(
            "https://myresource.openai.azure.com/",
            ApiKey::new("azure-key"),
            DEFAULT_AZURE_API_VERSION,
        );
        let _unconfigured = ProviderConfig::azure(
            "https://your-azure-endpoint.openai.azure.com/",
            ApiKey::new("azure-key"),
            DEFAULT_AZURE_API_VERSION,
        );
        drop(guard);

        let output = capture::output(&logs);
        assert_eq!(output.matches("looks like a placeholder").count(), 1);
        assert!(output.contains("AZURE_ENDPOINT"));
    }

    #[test]
    fn test_local_config() {
        let config = ProviderConfig::local(ApiKey::new("sk-test"));

        assert_eq!(config.kind, ProviderKind::Local);
        assert_eq!(config.base_url.as_str(), "https://api.openai.com/v1");
        assert_eq!(config.default_model.as_str(), "gpt-4o");
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_with_default_model_override() {
        let config =
            ProviderConfig::github(ApiKey::new("ghp_test")).with_default_model("openai/gpt-4o-mini");
        assert_eq!(config.default_model.as_str(), "openai/gpt-4o-mini");
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = ProviderConfig::github(ApiKey::new("ghp_supersecretvalue123"));
        let debug = format!("{config:?}");
        assert!(!debug.contains("supersecretvalue"));
    }
}
