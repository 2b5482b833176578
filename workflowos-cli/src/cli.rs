//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// WorkflowOS -- onboarding workflow dashboard in the terminal.
///
/// Use `workflowos <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "workflowos", version, about, long_about = None)]
pub struct Cli {
    /// Path to the workflowos.toml configuration file.
    #[arg(short, long, default_value = "workflowos.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the whole dashboard page.
    Dashboard,

    /// Inspect configuration rules.
    Rules(RulesArgs),

    /// Show the onboarding timeline.
    Timeline,

    /// Show the recent activity feed.
    Events,

    /// Show the metric cards.
    Metrics,

    /// Inspect or run the simulated test suite.
    Tests(TestsArgs),

    /// Start an interactive session that keeps runner state between commands.
    Shell(ShellArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- rules ----

#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub action: RulesAction,
}

#[derive(Subcommand, Debug)]
pub enum RulesAction {
    /// List configuration rules.
    List {
        /// Filter by status (valid, invalid, warning).
        #[arg(long)]
        status: Option<String>,
    },
    /// Open a rule (same as clicking it on the dashboard).
    Inspect {
        /// Rule id.
        id: String,
    },
    /// Open the full rule list.
    ViewAll,
}

// ---- tests ----

#[derive(Args, Debug)]
pub struct TestsArgs {
    #[command(subcommand)]
    pub action: TestsAction,
}

#[derive(Subcommand, Debug)]
pub enum TestsAction {
    /// Show the current test list and completion.
    Status,
    /// Run all pending tests in order and wait for the result.
    Run {
        /// Seed for reproducible outcomes (overrides config).
        #[arg(long)]
        seed: Option<u64>,
    },
}

// ---- shell ----

#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Seed for reproducible outcomes (overrides config).
    #[arg(long)]
    pub seed: Option<u64>,
}

// ---- config ----

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, runner).
        #[arg(long)]
        section: Option<String>,
    },
}
