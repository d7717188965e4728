pub mod error;
pub mod factory;
pub mod http;
pub mod types;

pub mod mock;
pub mod openai;

pub use error::ProviderError;
pub use factory::{ProviderKind, create_provider};
pub use types::ApiKey;

pub use openai::{OpenAIProvider, ProviderConfig};
