//! Process bootstrap: mode detection, logger lifecycle, root command
//! execution and guaranteed cleanup.
//!
//! ```text
//! Start → mode detected
//!       → [Debug] logger init ──fail──▶ Err(LoggerInit)
//!       → command execution ──fail──▶ Err(Command)
//!       → [no subcommand] usage ──fail──▶ Ok(Outcome::Exit(3))
//!       → Ok(Outcome::Done)
//! ```
//!
//! Cleanup runs on every arrow leaving the sequencer.
pub mod cleanup;
pub mod errors;
pub mod mode;

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

pub use cleanup::ResourceGuard;
pub use errors::{BootstrapError, USAGE_RENDER_EXIT_CODE};
pub use mode::ExecutionMode;

use crate::commands::CommandError;
use crate::logger::{Logger, LoggerError, LoggerHandle};

/// What the root command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A subcommand (or `--help`/`--version`) ran to completion.
    Completed,
    /// No subcommand was given; usage text should be shown.
    UsageRequested,
}

/// How a run that did not fail should end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Return normally from `main`.
    Done,
    /// Terminate immediately with this exit code.
    Exit(i32),
}

/// Runs the parsed command tree.
pub trait Executor {
    /// # Errors
    ///
    /// Returns `CommandError` when argument parsing or the command fails.
    fn execute(&self) -> Result<Dispatch, CommandError>;
}

/// Prints usage text for the root command.
pub trait UsageRenderer {
    /// # Errors
    ///
    /// Returns an I/O error if the text cannot be written.
    fn render_usage(&self) -> io::Result<()>;
}

/// Opens the logging subsystem.
pub trait LoggerInit {
    /// # Errors
    ///
    /// Returns `LoggerError` if the logger cannot be opened.
    fn init(&self, to_file: bool) -> Result<LoggerHandle, LoggerError>;
}

/// Releases a logger opened by [`LoggerInit`].
pub trait LoggerClose {
    /// # Errors
    ///
    /// Returns `LoggerError` if buffered output cannot be flushed.
    fn close(&self, handle: LoggerHandle) -> Result<(), LoggerError>;
}

/// Terminates the process.
pub trait ProcessExit {
    fn exit(&self, code: i32);
}

impl<F: Fn() -> Result<Dispatch, CommandError>> Executor for F {
    fn execute(&self) -> Result<Dispatch, CommandError> {
        self()
    }
}

impl<F: Fn() -> io::Result<()>> UsageRenderer for F {
    fn render_usage(&self) -> io::Result<()> {
        self()
    }
}

impl<F: Fn(bool) -> Result<LoggerHandle, LoggerError>> LoggerInit for F {
    fn init(&self, to_file: bool) -> Result<LoggerHandle, LoggerError> {
        self(to_file)
    }
}

impl<F: Fn(LoggerHandle) -> Result<(), LoggerError>> LoggerClose for F {
    fn close(&self, handle: LoggerHandle) -> Result<(), LoggerError> {
        self(handle)
    }
}

impl<F: Fn(i32)> ProcessExit for F {
    fn exit(&self, code: i32) {
        self(code);
    }
}

impl LoggerInit for Logger {
    fn init(&self, to_file: bool) -> Result<LoggerHandle, LoggerError> {
        Logger::init(self, to_file)
    }
}

impl LoggerClose for Logger {
    fn close(&self, handle: LoggerHandle) -> Result<(), LoggerError> {
        Logger::close(self, handle)
    }
}

/// Exits through [`std::process::exit`].
pub struct StdExit;

impl ProcessExit for StdExit {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}

/// Capabilities the sequencer drives.
pub struct Collaborators<'a> {
    pub executor: &'a dyn Executor,
    pub usage: &'a dyn UsageRenderer,
    pub logger_init: &'a dyn LoggerInit,
    pub logger_close: &'a dyn LoggerClose,
}

/// Orchestrates one process run.
pub struct Sequencer<'a> {
    collaborators: Collaborators<'a>,
    env: fn(&str) -> Option<OsString>,
}

impl<'a> Sequencer<'a> {
    /// Sequencer reading its mode from the process environment.
    #[must_use]
    pub fn new(collaborators: Collaborators<'a>) -> Self {
        Self {
            collaborators,
            env: |key| std::env::var_os(key),
        }
    }

    /// Replace the environment lookup used for mode detection.
    #[must_use]
    pub fn with_env(mut self, env: fn(&str) -> Option<OsString>) -> Self {
        self.env = env;
        self
    }

    /// Run mode detection, logging setup and the root command.
    ///
    /// Resources acquired here are released before this returns, on every
    /// path. A failure to print usage text is reported as
    /// `Ok(Outcome::Exit(USAGE_RENDER_EXIT_CODE))`.
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::LoggerInit` if debug logging cannot be opened
    /// (the command is not run), and `BootstrapError::Command` if the command
    /// fails.
    pub fn run(&self) -> Result<Outcome, BootstrapError> {
        let c = &self.collaborators;
        let mut guard = ResourceGuard::new(c.logger_close);

        let mode = ExecutionMode::detect(self.env);
        if mode.is_debug() {
            // Console only: file logging is never enabled from here.
            let handle = c.logger_init.init(false).map_err(BootstrapError::LoggerInit)?;
            guard.track_logger(handle);
        }
        tracing::debug!(%mode, "execution mode detected");

        let outcome = match c.executor.execute()? {
            Dispatch::Completed => Outcome::Done,
            Dispatch::UsageRequested => match c.usage.render_usage() {
                Ok(()) => Outcome::Done,
                Err(err) => {
                    tracing::error!(error = %err, "failed to print usage");
                    Outcome::Exit(USAGE_RENDER_EXIT_CODE)
                }
            },
        };

        tracing::debug!(?outcome, "run finished");
        Ok(outcome)
    }
}

/// Turn the result of [`Sequencer::run`] into the process exit status.
///
/// Errors are printed to stderr. `Outcome::Exit` is handed to `exit`, which
/// in production does not return.
pub fn conclude(result: Result<Outcome, BootstrapError>, exit: &dyn ProcessExit) -> ExitCode {
    let code = settle(result, exit);
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}

fn settle(result: Result<Outcome, BootstrapError>, exit: &dyn ProcessExit) -> i32 {
    match result {
        Ok(Outcome::Done) => 0,
        Ok(Outcome::Exit(code)) => {
            exit.exit(code);
            code
        }
        Err(BootstrapError::Command(CommandError::Arguments(err))) => {
            let _ = err.print();
            err.exit_code()
        }
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "Error: {err}");
            err.exit_code()
        }
    }
}
