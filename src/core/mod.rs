pub mod agent;
pub mod error;
pub mod llm;
pub mod structured;
pub mod types;

pub use agent::{Agent, Answer, Structured};
pub use error::{AgentError, Result};
pub use llm::LLM;
