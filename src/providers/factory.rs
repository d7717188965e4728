use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::llm::LLM;

use super::openai::{OpenAIProvider, ProviderConfig};

/// Which backend serves the query. Every kind speaks the same chat
/// completions protocol; they differ in endpoint, credential, and model
/// naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// GitHub Models, authenticated with GITHUB_TOKEN
    Github,
    /// An Azure OpenAI deployment, authenticated with AZURE_API_KEY
    Azure,
    /// The OpenAI API, authenticated with OPENAI_API_KEY
    Local,
}

impl ProviderKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Azure => "azure",
            Self::Local => "local",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Github => "GitHub Models",
            Self::Azure => "Azure OpenAI",
            Self::Local => "OpenAI",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves credentials from the environment and builds the provider for
/// `kind`, with an optional model (or Azure deployment) override.
pub fn create_provider(kind: ProviderKind, model_override: Option<&str>) -> Result<Arc<dyn LLM>> {
    let config = ProviderConfig::from_env(kind)?;

    let mut provider = OpenAIProvider::new(config)?;
    if let Some(model) = model_override {
        provider = provider.with_model(model);
    }

    Ok(Arc::new(provider))
}
