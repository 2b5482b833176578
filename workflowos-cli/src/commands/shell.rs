//! `workflowos shell` -- interactive session
//!
//! Keeps one runner and one dashboard alive between commands so a run can be
//! started, observed, cancelled and retried like on the web dashboard.

use std::io::Write;
use std::sync::Arc;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use workflowos_core::config::WorkflowConfig;
use workflowos_core::notify::{ActionEffect, Notifier};
use workflowos_dashboard::Dashboard;
use workflowos_test_runner::{RetryOutcome, RunStart, TestRunner};

use crate::cli::{OutputFormat, ShellArgs};
use crate::commands::{events, metrics, rules, tests as test_cmd, timeline};
use crate::error::CliError;
use crate::notifier::TerminalNotifier;
use crate::output::OutputWriter;

const PROMPT: &str = "workflowos> ";

const HELP: &str = "\
commands:
  run           run all pending tests in order
  retry <id>    reset a failed test so the next run picks it up
  cancel        cancel the run in progress
  act           follow the action of the last notification
  status        show the test list
  dashboard     show the whole page
  rules         list configuration rules
  rule <id>     open a configuration rule
  view-all      open the full rule list
  timeline      show the onboarding timeline
  events        show recent activity
  metrics       show metric cards
  help          show this help
  quit          leave the shell";

/// A parsed shell input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Run,
    Retry(String),
    Cancel,
    Act,
    Status,
    Dashboard,
    Rules,
    Rule(String),
    ViewAll,
    Timeline,
    Events,
    Metrics,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Ok(Self::Empty);
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(format!("too many arguments for '{head}'"));
        }

        let require_id = |name: &str| {
            arg.map(str::to_owned)
                .ok_or_else(|| format!("usage: {name} <id>"))
        };
        let no_arg = |cmd: Self| match arg {
            Some(extra) => Err(format!("'{head}' takes no argument, got '{extra}'")),
            None => Ok(cmd),
        };

        match head.to_lowercase().as_str() {
            "run" => no_arg(Self::Run),
            "retry" => require_id("retry").map(Self::Retry),
            "cancel" => no_arg(Self::Cancel),
            "act" => no_arg(Self::Act),
            "status" => no_arg(Self::Status),
            "dashboard" => no_arg(Self::Dashboard),
            "rules" => no_arg(Self::Rules),
            "rule" => require_id("rule").map(Self::Rule),
            "view-all" => no_arg(Self::ViewAll),
            "timeline" => no_arg(Self::Timeline),
            "events" => no_arg(Self::Events),
            "metrics" => no_arg(Self::Metrics),
            "help" | "?" => no_arg(Self::Help),
            "quit" | "exit" => no_arg(Self::Quit),
            other => Err(format!("unknown command '{other}', type 'help'")),
        }
    }
}

struct Session {
    runner: TestRunner,
    dashboard: Dashboard,
    notifier: Arc<TerminalNotifier>,
    writer: OutputWriter,
}

/// Execute the `shell` command.
pub async fn execute(
    args: ShellArgs,
    config: &WorkflowConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let notifier = Arc::new(TerminalNotifier::new(writer.format()));
    let runner = test_cmd::build_runner(config, args.seed, notifier.clone())?;
    let session = Session {
        dashboard: Dashboard::from_fixtures(notifier.clone()),
        runner,
        notifier,
        writer: *writer,
    };

    let printer = (writer.format() == OutputFormat::Text)
        .then(|| tokio::spawn(test_cmd::print_progress(session.runner.subscribe(), true)));

    info!(seed = ?args.seed, "interactive shell started");
    say(&format!("{}  (type 'help' for commands)", "WorkflowOS".bold()))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match ShellCommand::parse(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => command,
            Err(message) => {
                say(&message.red().to_string())?;
                continue;
            }
        };
        if let Err(e) = session.dispatch(command).await {
            say(&format!("error: {e}").red().to_string())?;
        }
    }

    session.runner.cancel().await;
    if let Some(printer) = printer {
        printer.abort();
    }
    info!("interactive shell closed");
    Ok(())
}

impl Session {
    async fn dispatch(&self, command: ShellCommand) -> Result<(), CliError> {
        match command {
            ShellCommand::Run => {
                if let RunStart::AlreadyRunning = self.runner.run_all().await {
                    say(&"a run is already in progress".dimmed().to_string())?;
                }
            }
            ShellCommand::Retry(id) => self.retry(&id).await?,
            ShellCommand::Cancel => {
                if !self.runner.cancel().await {
                    say(&"no run in progress".dimmed().to_string())?;
                }
            }
            ShellCommand::Act => self.follow_last_action().await?,
            ShellCommand::Status => test_cmd::render_status(&self.runner, &self.writer).await?,
            ShellCommand::Dashboard => {
                let suite = self.runner.snapshot().await;
                let running = self.runner.is_running().await;
                self.writer.render(&self.dashboard.page(&suite, running))?;
            }
            ShellCommand::Rules => rules::execute_list(&self.dashboard.rules, None, &self.writer)?,
            ShellCommand::Rule(id) => {
                rules::execute_inspect(&self.dashboard.rules, &id, &self.writer)?
            }
            ShellCommand::ViewAll => {
                self.dashboard.rules.view_all();
            }
            ShellCommand::Timeline => timeline::render(&self.dashboard.timeline, &self.writer)?,
            ShellCommand::Events => events::render(&self.dashboard.activity, &self.writer)?,
            ShellCommand::Metrics => metrics::execute(&self.dashboard, &self.writer)?,
            ShellCommand::Help => say(HELP)?,
            ShellCommand::Quit | ShellCommand::Empty => {}
        }
        Ok(())
    }

    async fn retry(&self, id: &str) -> Result<(), CliError> {
        match self.runner.retry(id).await {
            RetryOutcome::Reset => {}
            RetryOutcome::NotFailed(status) => say(
                &format!("test {id} is {status}; only failed tests can be retried")
                    .dimmed()
                    .to_string(),
            )?,
            RetryOutcome::NotFound => {
                return Err(CliError::Command(format!("no test with id '{id}'")));
            }
        }
        Ok(())
    }

    async fn follow_last_action(&self) -> Result<(), CliError> {
        match self.notifier.take_last_action().map(|a| a.effect) {
            Some(ActionEffect::RetryTest { test_id }) => self.retry(&test_id).await,
            Some(ActionEffect::Notify { notification }) => {
                self.notifier.notify(*notification);
                Ok(())
            }
            None => say(&"no pending action".dimmed().to_string()),
        }
    }
}

fn say(message: &str) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{message}")?;
    Ok(())
}

fn prompt() -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{PROMPT}")?;
    handle.flush()?;
    Ok(())
}
