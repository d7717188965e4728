use std::path::Path;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::providers::error::ProviderError;

use super::error::{AgentError, Result};
use super::llm::LLM;
use super::structured;
use super::types::{
    CompletionRequest, ContentBlock, Message, ResponseFormat, Role, StopReason, Usage,
};

/// One-shot question runner over an [`LLM`]. Holds the per-run knobs
/// (system prompt, sampling settings, attachments) and builds a single
/// user turn per ask.
pub struct Agent {
    llm: Arc<dyn LLM>,
    system_prompt: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    attachments: Vec<ContentBlock>,
}

/// Plain-text result of a run.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Typed result of a schema-constrained run.
#[derive(Debug, Clone)]
pub struct Structured<T> {
    pub value: T,
    pub usage: Usage,
}

impl Agent {
    #[must_use]
    pub fn new(llm: Arc<dyn LLM>) -> Self {
        Self {
            llm,
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            attachments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Adds a content block to the next user turn, after the query text.
    #[must_use]
    pub fn attach(mut self, block: ContentBlock) -> Self {
        self.attachments.push(block);
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Sends `query` as a single user turn and returns the text reply.
    pub async fn ask(&self, query: &str) -> Result<Answer> {
        let request = self.build_request(query);
        debug!(
            model = self.llm.model(),
            attachments = self.attachments.len(),
            "sending completion request"
        );

        let response = self.llm.complete(request).await?;
        let text = response.text();
        debug!(
            stop_reason = ?response.stop_reason,
            usage = %response.usage,
            answer = %text,
            "completion finished"
        );

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse.into());
        }

        Ok(Answer {
            text,
            stop_reason: response.stop_reason,
            usage: response.usage,
        })
    }

    /// Like [`Agent::ask`], but instructs the model to answer as JSON
    /// matching `T`'s schema and parses the reply into `T`.
    pub async fn ask_structured<T>(&self, query: &str) -> Result<Structured<T>>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let prompt = structured::schema_instructions::<T>(query)?;
        let mut request = self.build_request(&prompt);
        request.response_format = Some(ResponseFormat::JsonObject);

        debug!(model = self.llm.model(), "sending structured request");
        let response = self.llm.complete(request).await?;
        let text = response.text();
        debug!(
            usage = %response.usage,
            answer = %text,
            "structured completion finished"
        );

        let value = structured::parse_structured(&text)?;
        Ok(Structured {
            value,
            usage: response.usage,
        })
    }

    fn build_request(&self, query: &str) -> CompletionRequest {
        let mut content = vec![ContentBlock::text(query)];
        content.extend(self.attachments.iter().cloned());

        let mut request = CompletionRequest::new(vec![Message::new(Role::User, content)]);
        if let Some(prompt) = &self.system_prompt {
            request = request.with_system_prompt(prompt.clone());
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        request
    }
}

/// Turns an `--image` argument into a content block. `http(s)` values pass
/// through as URLs; anything else is read from disk and inlined as base64.
pub fn image_block(source: &str) -> Result<ContentBlock> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return Ok(ContentBlock::image_url(source));
    }

    let path = Path::new(source);
    let media_type = media_type_for(path).ok_or_else(|| {
        AgentError::InvalidImage(format!("unsupported file extension: {source}"))
    })?;
    let bytes = std::fs::read(path)?;
    let encoded = general_purpose::STANDARD.encode(&bytes);
    Ok(ContentBlock::image_base64(media_type, encoded))
}

fn media_type_for(path: &Path) -> Option<&'static str> {
    match path
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase()
        .as_str()
    {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
