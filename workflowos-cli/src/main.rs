//! WorkflowOS CLI -- onboarding workflow dashboard and simulated test runner.

mod cli;
mod commands;
mod error;
mod logging;
mod notifier;
mod output;
mod views;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing::{debug, warn};

use workflowos_core::config::WorkflowConfig;
use workflowos_core::notify::Notifier;
use workflowos_dashboard::Dashboard;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::notifier::TerminalNotifier;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Configuration together with whether the config file was present.
struct LoadedConfig {
    config: WorkflowConfig,
    file_found: bool,
}

/// Precedence: CLI flags > env > file > defaults.
async fn load_config(cli: &Cli) -> Result<LoadedConfig, CliError> {
    let file_found = tokio::fs::try_exists(&cli.config).await.unwrap_or(false);
    let mut config = WorkflowConfig::load_or_default(&cli.config).await?;
    if let Some(level) = &cli.log_level {
        config.general.log_level = level.clone();
        config.validate()?;
    }
    Ok(LoadedConfig { config, file_found })
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let LoadedConfig { config, file_found } = match load_config(&cli).await {
        Ok(loaded) => loaded,
        // `config` subcommands report file problems themselves
        Err(_) if matches!(cli.command, Commands::Config(_)) => LoadedConfig {
            config: WorkflowConfig::default(),
            file_found: true,
        },
        Err(e) => return Err(e),
    };
    logging::init_tracing(&config.general)?;
    workflowos_core::metrics::describe_all();

    if !file_found {
        warn!(path = %cli.config.display(), "config file not found, using defaults");
    }
    debug!(command = ?cli.command, "dispatching command");

    let writer = OutputWriter::new(cli.output);
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier::new(cli.output));

    match cli.command {
        Commands::Dashboard => commands::dashboard::execute(&writer, notifier).await,
        Commands::Rules(args) => commands::rules::execute(args, &writer, notifier),
        Commands::Timeline => commands::timeline::execute(&writer),
        Commands::Events => commands::events::execute(&writer),
        Commands::Metrics => {
            commands::metrics::execute(&Dashboard::from_fixtures(notifier), &writer)
        }
        Commands::Tests(args) => {
            commands::tests::execute(args, &config, &writer, notifier).await
        }
        Commands::Shell(args) => commands::shell::execute(args, &config, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
