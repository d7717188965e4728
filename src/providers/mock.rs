#![allow(clippy::expect_used, dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::core::error::Result;
use crate::core::llm::LLM;
use crate::core::types::{
    CompletionRequest, CompletionResponse, Message, StopReason, Usage,
};
use crate::providers::error::ProviderError;

/// In-memory [`LLM`] for tests. Pops queued responses in FIFO order and
/// records every request it receives.
#[derive(Clone)]
pub struct MockLLM {
    name: String,
    model: String,
    responses: Arc<Mutex<Vec<CompletionResponse>>>,
    request_history: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLLM {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            model: "mock-model".to_string(),
            responses: Arc::new(Mutex::new(Vec::new())),
            request_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_response(self, response: CompletionResponse) -> Self {
        self.responses
            .lock()
            .expect("MockLLM mutex poisoned")
            .push(response);
        self
    }

    /// Queues a plain-text assistant reply with nominal usage numbers.
    #[must_use]
    pub fn with_text_response(self, text: impl Into<String>) -> Self {
        self.with_response(CompletionResponse::new(
            Message::assistant(text),
            StopReason::EndTurn,
            Usage::new(10, 5),
        ))
    }

    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.request_history
            .lock()
            .expect("MockLLM mutex poisoned")
            .clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_history
            .lock()
            .expect("MockLLM mutex poisoned")
            .len()
    }
}

impl Default for MockLLM {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLM for MockLLM {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.request_history
            .lock()
            .expect("MockLLM mutex poisoned")
            .push(request);

        let mut responses = self.responses.lock().expect("MockLLM mutex poisoned");
        if responses.is_empty() {
            Err(ProviderError::EmptyResponse.into())
        } else {
            Ok(responses.remove(0))
        }
    }
}
