use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::agent::image_block;
use crate::core::{Agent, AgentError, Result};
use crate::providers::create_provider;

use super::args::{Cli, Commands, ConfigSubcommands};
use super::output::{RunReport, UsageReport};

/// Runs the parsed command line to completion. The caller maps any error
/// to a nonzero exit.
pub async fn execute(cli: Cli) -> Result<()> {
    if let Some(Commands::Config { command }) = &cli.command {
        return run_config_command(command);
    }

    let config = AppConfig::load();
    let report = run_query(&cli, &config).await?;
    println!("{}", report.render(cli.format)?);
    Ok(())
}

fn run_config_command(command: &ConfigSubcommands) -> Result<()> {
    match command {
        ConfigSubcommands::Init => {
            let path = AppConfig::init_default()?;
            println!("✓ Created config file at {}", path.display());
        }
        ConfigSubcommands::Where => {
            let path = AppConfig::get_config_path().ok_or_else(|| {
                AgentError::Config("Could not determine config directory".to_string())
            })?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn run_query(cli: &Cli, config: &AppConfig) -> Result<RunReport> {
    let kind = cli.provider.ok_or_else(|| {
        AgentError::Config("No provider selected. Use --provider {github|azure|local}".to_string())
    })?;
    debug!(provider = kind.as_str(), query = %cli.query, "starting run");

    let model_override = cli.model.as_deref().or(config.model.as_deref());
    let llm = create_provider(kind, model_override)?;
    info!(
        provider = kind.as_str(),
        model = llm.model(),
        "provider ready"
    );

    let mut agent = Agent::new(llm);
    if let Some(system) = cli.system.as_deref().or(config.system_prompt.as_deref()) {
        agent = agent.with_system_prompt(system);
    }
    if let Some(max_tokens) = cli.max_tokens.or(config.max_tokens) {
        agent = agent.with_max_tokens(max_tokens);
    }
    if let Some(temperature) = cli.temperature.or(config.temperature) {
        agent = agent.with_temperature(temperature);
    }
    if let Some(image) = &cli.image {
        debug!(image = %image, "attaching image");
        agent = agent.attach(image_block(image)?);
    }

    let answer = agent.ask(&cli.query).await?;
    debug!(usage = %answer.usage, stop_reason = ?answer.stop_reason, "answer received");

    Ok(RunReport {
        provider: kind,
        model: agent.model().to_string(),
        query: cli.query.clone(),
        answer: answer.text,
        usage: UsageReport::from(answer.usage),
    })
}
