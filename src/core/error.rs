use thiserror::Error;

use crate::providers::error::ProviderError;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Provider(ProviderError),

    #[error("Invalid image attachment: {0}")]
    InvalidImage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// Follow-up advice for the user, when the underlying failure carries any.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Provider(err) => err.hint(),
            _ => None,
        }
    }
}

/// Missing-credential failures surface as `Config` so the CLI reports them
/// uniformly, whichever layer noticed first.
impl From<ProviderError> for AgentError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Configuration(message) => Self::Config(message),
            other => Self::Provider(other),
        }
    }
}
