//! Query a large-language-model from the command line through GitHub
//! Models, an Azure OpenAI deployment, or the OpenAI API directly.

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod providers;
