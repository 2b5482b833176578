//! CLI-specific error types and exit code mapping

use workflowos_core::error::WorkflowError;
use workflowos_dashboard::DashboardError;
use workflowos_test_runner::TestRunnerError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdin read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from workflowos-core.
    #[error("{0}")]
    Core(#[from] WorkflowError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                 |
    /// |------|-------------------------|
    /// | 0    | Success                 |
    /// | 1    | General / command error |
    /// | 2    | Configuration error     |
    /// | 10   | IO error                |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Core(WorkflowError::Config(_)) => 2,
            Self::Io(_) | Self::Core(WorkflowError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(WorkflowError::Runner(_)) => 1,
        }
    }
}

impl From<DashboardError> for CliError {
    fn from(e: DashboardError) -> Self {
        Self::Command(e.to_string())
    }
}

impl From<TestRunnerError> for CliError {
    fn from(e: TestRunnerError) -> Self {
        Self::Core(e.into())
    }
}
