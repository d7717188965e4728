use async_trait::async_trait;

use super::error::Result;
use super::types::{CompletionRequest, CompletionResponse};

/// A chat-completion backend. One implementation covers all hosted
/// providers; `MockLLM` stands in for tests.
#[async_trait]
pub trait LLM: Send + Sync {
    fn name(&self) -> &str;
    fn model(&self) -> &str;
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}
