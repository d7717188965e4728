//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::providers::ProviderKind;

/// Question sent when `--query` is not given.
pub const DEFAULT_QUERY: &str = "Where were the olympics held in 2012?";

#[derive(Parser, Debug)]
#[command(name = "llmq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Provider to query
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Question to send to the model
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Model or deployment name override (e.g., openai/gpt-4o)
    #[arg(short, long)]
    pub model: Option<String>,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Image to attach, as a local path or http(s) URL
    #[arg(long)]
    pub image: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Maximum completion tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Emit request/response diagnostics to stderr
    #[arg(short, long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Machine-readable envelope
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigSubcommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommands {
    /// Initialize a new config file
    Init,
    /// Print config file location
    Where,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_query_defaults_to_sample_question() {
        let cli = Cli::parse_from(["llmq", "--provider", "github"]);
        assert_eq!(cli.query, DEFAULT_QUERY);
        assert_eq!(cli.provider, Some(ProviderKind::Github));
        assert!(!cli.debug);
    }

    #[test]
    fn test_provider_is_optional_for_config_subcommand() {
        let cli = Cli::parse_from(["llmq", "config", "where"]);
        assert!(cli.provider.is_none());
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigSubcommands::Where
            })
        ));
    }

    #[test]
    fn test_format_defaults_to_text() {
        let cli = Cli::parse_from(["llmq", "-p", "local"]);
        assert_eq!(cli.format, OutputFormat::Text);

        let cli = Cli::parse_from(["llmq", "-p", "local", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_provider() {
        let result = Cli::try_parse_from(["llmq", "--provider", "openai"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_sampling_flags_parse() {
        let cli = Cli::parse_from([
            "llmq",
            "-p",
            "azure",
            "--max-tokens",
            "256",
            "--temperature",
            "0.2",
        ]);
        assert_eq!(cli.max_tokens, Some(256));
        assert_eq!(cli.temperature, Some(0.2));
    }
}
