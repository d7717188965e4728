use crate::core::types::ResponseFormat as CoreResponseFormat;
use crate::core::types::{
    CompletionRequest, CompletionResponse, ContentBlock, ImageSource, Message, Role, StopReason,
    Usage,
};
use crate::providers::error::ProviderError;

use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageUrl,
    MessageContent, ResponseFormat,
};

/// Lowers a completion request onto the wire. `json_mode` reflects what
/// the target provider supports; when it is off, a requested JSON format
/// is omitted and the schema instructions in the prompt do the steering.
pub fn to_api_request(
    model: &str,
    request: &CompletionRequest,
    json_mode: bool,
) -> ChatCompletionRequest {
    let mut messages: Vec<ChatMessage> = Vec::new();

    if let Some(system_prompt) = &request.system_prompt {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: Some(MessageContent::Text(system_prompt.clone())),
        });
    }

    for msg in &request.messages {
        messages.push(to_chat_message(msg));
    }

    let response_format = match request.response_format {
        Some(CoreResponseFormat::JsonObject) if json_mode => Some(ResponseFormat::json_object()),
        _ => None,
    };

    ChatCompletionRequest {
        model: model.to_string(),
        messages,
        temperature: Some(request.temperature),
        max_tokens: Some(request.max_tokens),
        response_format,
    }
}

fn to_chat_message(message: &Message) -> ChatMessage {
    let role = match message.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    };

    let content = if message.has_images() {
        let parts: Vec<ContentPart> = message
            .content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => ContentPart::Text { text: text.clone() },
                ContentBlock::Image { source } => {
                    let url = match source {
                        ImageSource::Base64 { media_type, data } => {
                            format!("data:{media_type};base64,{data}")
                        }
                        ImageSource::Url { url } => url.clone(),
                    };
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url, detail: None },
                    }
                }
            })
            .collect();

        Some(MessageContent::Parts(parts))
    } else {
        let text: String = message
            .content
            .iter()
            .filter_map(ContentBlock::as_text)
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            None
        } else {
            Some(MessageContent::Text(text))
        }
    };

    ChatMessage {
        role: role.to_string(),
        content,
    }
}

pub fn from_api_response(
    response: ChatCompletionResponse,
) -> Result<CompletionResponse, ProviderError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    if let Some(refusal) = choice.message.refusal
        && !refusal.is_empty()
    {
        return Err(ProviderError::Refusal(refusal));
    }

    let mut content: Vec<ContentBlock> = Vec::new();
    if let Some(text) = choice.message.content
        && !text.is_empty()
    {
        content.push(ContentBlock::Text { text });
    }

    let message = Message {
        role: Role::Assistant,
        content,
    };

    let stop_reason = match choice.finish_reason.as_deref() {
        Some("length") => StopReason::MaxTokens,
        Some("content_filter") => StopReason::ContentFilter,
        _ => StopReason::EndTurn,
    };

    let usage = response.usage.map_or_else(Usage::default, |u| {
        Usage::new(u.prompt_tokens, u.completion_tokens)
    });

    Ok(CompletionResponse::new(message, stop_reason, usage))
}
