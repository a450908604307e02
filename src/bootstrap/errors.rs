/// Errors surfaced by [`super::Sequencer::run`].
use thiserror::Error;

use crate::commands::CommandError;
use crate::logger::LoggerError;

/// Exit code for failures without a more specific mapping.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Exit code forced when usage text cannot be printed.
pub const USAGE_RENDER_EXIT_CODE: i32 = 3;

/// The phase of a run that failed.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Debug mode was requested but the logger could not be opened.
    #[error("logger initialization failed: {0}")]
    LoggerInit(#[source] LoggerError),

    /// The root command returned an error.
    #[error("command execution failed: {0}")]
    Command(#[from] CommandError),
}

impl BootstrapError {
    /// Return the process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::LoggerInit(_) => FAILURE_EXIT_CODE,
            Self::Command(err) => err.exit_code(),
        }
    }
}
