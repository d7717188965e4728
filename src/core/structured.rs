//! Structured output support: the desired shape is described to the model
//! as a JSON schema, and the reply is parsed back into the caller's type.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::error::{AgentError, Result};
use crate::providers::error::ProviderError;

/// Builds the prompt for a schema-constrained query.
pub fn schema_instructions<T: JsonSchema>(query: &str) -> Result<String> {
    let schema = schemars::schema_for!(T);
    let schema_json = serde_json::to_string_pretty(&schema)?;
    Ok(format!(
        "{query}\n\nRespond with a single JSON object that matches this JSON schema:\n{schema_json}\n\nReturn only the JSON object, with no explanatory text."
    ))
}

/// Parses a model reply into `T`, tolerating markdown fences and
/// surrounding prose.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T> {
    let json = extract_json(text);
    serde_json::from_str(json).map_err(|e| {
        AgentError::Provider(ProviderError::Parse(format!(
            "structured response was not valid JSON: {e}; raw: {text}"
        )))
    })
}

/// Extract JSON from a reply that might be wrapped in markdown code fences.
fn extract_json(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let content = &text[start + 7..];
        if let Some(end) = content.find("```") {
            return content[..end].trim();
        }
    }
    if let Some(start) = text.find("```") {
        let content = &text[start + 3..];
        if let Some(end) = content.find("```") {
            let inner = content[..end].trim();
            if inner.starts_with('{') || inner.starts_with('[') {
                return inner;
            }
        }
    }
    if let Some(start) = text.find('{')
        && let Some(end) = text.rfind('}')
        && start < end
    {
        return &text[start..=end];
    }
    text
}
