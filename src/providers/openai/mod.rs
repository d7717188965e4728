pub mod config;
pub mod convert;
pub mod types;

use async_trait::async_trait;
use tracing::debug;

use crate::core::error::Result;
use crate::core::llm::LLM;
use crate::core::types::{CompletionRequest, CompletionResponse};
use crate::providers::error::ProviderError;
use crate::providers::factory::ProviderKind;
use crate::providers::http::{HttpClient, HttpConfig};
use crate::providers::types::ModelId;

pub use config::{ProviderCapabilities, ProviderConfig};

/// Chat-completions client for all three provider kinds. The differences
/// live entirely in [`ProviderConfig`]; the request/response handling is
/// identical.
#[derive(Clone)]
pub struct OpenAIProvider {
    http: HttpClient,
    config: ProviderConfig,
    model: ModelId,
}

impl std::fmt::Debug for OpenAIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIProvider")
            .field("provider", &self.config.kind)
            .field("model", &self.model)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAIProvider {
    pub fn new(config: ProviderConfig) -> std::result::Result<Self, ProviderError> {
        let model = config.default_model.clone();
        Ok(Self {
            http: HttpClient::new()?,
            config,
            model,
        })
    }

    pub fn with_http_config(
        config: ProviderConfig,
        http_config: HttpConfig,
    ) -> std::result::Result<Self, ProviderError> {
        let model = config.default_model.clone();
        Ok(Self {
            http: HttpClient::with_config(http_config)?,
            config,
            model,
        })
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<ModelId>) -> Self {
        self.model = model.into();
        self
    }

    /// Azure routes through a per-deployment path; the other providers
    /// share the flat chat-completions path.
    fn endpoint(&self) -> String {
        if self.config.kind == ProviderKind::Azure {
            self.config
                .base_url
                .join(&format!("/openai/deployments/{}/chat/completions", self.model))
        } else {
            self.config.base_url.join("/chat/completions")
        }
    }
}

#[async_trait]
impl LLM for OpenAIProvider {
    fn name(&self) -> &str {
        self.config.kind.as_str()
    }

    fn model(&self) -> &str {
        self.model.as_str()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let api_request = convert::to_api_request(
            self.model.as_str(),
            &request,
            self.config.capabilities.json_mode,
        );

        let url = self.endpoint();
        let body =
            serde_json::to_string(&api_request).map_err(crate::core::error::AgentError::Json)?;

        debug!(url = %url, model = %self.model, bytes = body.len(), "sending chat completion");

        let mut builder = self
            .http
            .post(&url, &self.config.auth)
            .header("content-type", "application/json");

        if let Some(api_version) = &self.config.api_version {
            builder = builder.query(&[("api-version", api_version.as_str())]);
        }

        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(
                status.as_u16(),
                &error_body,
                self.config.api_key_env,
            )
            .into());
        }

        let api_response: types::ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        debug!(id = %api_response.id, "chat completion received");

        convert::from_api_response(api_response).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::types::ApiKey;

    #[test]
    fn test_github_provider_creation() {
        let provider = OpenAIProvider::new(ProviderConfig::github(ApiKey::new("ghp_test")))
            .expect("create provider");

        assert_eq!(provider.name(), "github");
        assert_eq!(provider.model(), "openai/gpt-4o");
        assert_eq!(
            provider.endpoint(),
            "https://models.github.ai/inference/chat/completions"
        );
    }

    #[test]
    fn test_local_provider_creation() {
        let provider = OpenAIProvider::new(ProviderConfig::local(ApiKey::new("sk-test")))
            .expect("create provider");

        assert_eq!(provider.name(), "local");
        assert_eq!(provider.model(), "gpt-4o");
        assert_eq!(
            provider.endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_azure_endpoint_includes_deployment() {
        let config = ProviderConfig::azure(
            "https://myresource.openai.azure.com",
            ApiKey::new("azure-key"),
            config::DEFAULT_AZURE_API_VERSION,
        );
        let provider = OpenAIProvider::new(config).expect("create provider");

        assert_eq!(provider.name(), "azure");
        assert_eq!(
            provider.endpoint(),
            "https://myresource.openai.azure.com/openai/deployments/gpt-4o/chat/completions"
        );
    }

    #[test]
    fn test_azure_endpoint_follows_model_override() {
        let config = ProviderConfig::azure(
            "https://myresource.openai.azure.com",
            ApiKey::new("azure-key"),
            config::DEFAULT_AZURE_API_VERSION,
        );
        let provider = OpenAIProvider::new(config)
            .expect("create provider")
            .with_model("my-gpt4o-deployment");

        assert_eq!(
            provider.endpoint(),
            "https://myresource.openai.azure.com/openai/deployments/my-gpt4o-deployment/chat/completions"
        );
    }

    #[test]
    fn test_provider_debug_hides_secrets() {
        let provider = OpenAIProvider::new(ProviderConfig::github(ApiKey::new(
            "ghp_secretvalue12345",
        )))
        .expect("create provider");

        let debug = format!("{provider:?}");
        assert!(debug.contains("OpenAIProvider"));
        assert!(debug.contains("github"));
        assert!(!debug.contains("secretvalue"));
    }
}
