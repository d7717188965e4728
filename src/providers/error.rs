#![allow(dead_code)]

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        hint: Option<String>,
    },

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Provider returned an empty completion")]
    EmptyResponse,

    #[error("Model declined to answer: {0}")]
    Refusal(String),
}

impl ProviderError {
    #[must_use]
    pub fn auth_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Follow-up advice for the user, when the failure has an obvious fix.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Authentication { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Maps a non-success HTTP response to a typed error. All three
    /// providers return the OpenAI error envelope `{"error": {"message": ...}}`,
    /// so the body is parsed for it before falling back to the bare status.
    #[must_use]
    pub fn from_status(status: u16, body: &str, api_key_env_var: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error")?.get("message")?.as_str().map(String::from))
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            401 | 403 => Self::Authentication {
                message,
                hint: Some(format!("Check your {api_key_env_var} environment variable")),
            },
            429 => Self::RateLimit(message),
            400..=499 => Self::InvalidRequest(message),
            500..=599 => Self::Server { status, message },
            _ => Self::InvalidRequest(message),
        }
    }
}
