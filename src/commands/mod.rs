/// Command dispatch: parses the command line and routes subcommands.
pub mod check_output;
pub mod errors;

use std::ffi::OsString;
use std::io::{self, Write};

use clap::{CommandFactory, Parser};

pub use errors::CommandError;

use crate::bootstrap::{Dispatch, Executor, UsageRenderer};
use crate::cli::{Cli, Command, OutputCtx};
use crate::writer::OutputConfig;

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `CommandError` on any command failure.
pub fn dispatch(
    command: &Command,
    ctx: &OutputCtx,
    config: &OutputConfig,
) -> Result<(), CommandError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::CheckOutput(args) => check_output::run(args, ctx, config, &mut out),
    }
}

/// The `crcgen` root command, bound to its raw arguments.
pub struct RootCommand<'a> {
    args: Vec<OsString>,
    config: &'a OutputConfig,
}

impl<'a> RootCommand<'a> {
    /// `args` includes the binary name, as from [`std::env::args_os`].
    pub fn new<I, T>(args: I, config: &'a OutputConfig) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            config,
        }
    }
}

impl Executor for RootCommand<'_> {
    fn execute(&self) -> Result<Dispatch, CommandError> {
        let cli = match Cli::try_parse_from(&self.args) {
            Ok(cli) => cli,
            // --help and --version arrive as "errors" meant for stdout.
            Err(err) if !err.use_stderr() => {
                err.print()?;
                return Ok(Dispatch::Completed);
            }
            Err(err) => return Err(CommandError::Arguments(err)),
        };

        let Some(command) = &cli.command else {
            return Ok(Dispatch::UsageRequested);
        };

        tracing::debug!(?command, "dispatching");
        let ctx = OutputCtx::new(cli.format, cli.json, cli.no_header);
        dispatch(command, &ctx, self.config)?;
        Ok(Dispatch::Completed)
    }
}

impl UsageRenderer for RootCommand<'_> {
    fn render_usage(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        Cli::command().write_long_help(&mut out)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::FigmentReader;

    #[test]
    fn test_no_subcommand_requests_usage() {
        let config = OutputConfig::new(FigmentReader);
        let root = RootCommand::new(["crcgen"], &config);
        assert_eq!(root.execute().unwrap(), Dispatch::UsageRequested);
        assert!(!config.is_started());
    }

    #[test]
    fn test_unknown_argument() {
        let config = OutputConfig::new(FigmentReader);
        let root = RootCommand::new(["crcgen", "--bogus"], &config);
        let err = root.execute().unwrap_err();
        assert!(matches!(err, CommandError::Arguments(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_check_output_rejects_path() {
        let config = OutputConfig::new(FigmentReader);
        let root = RootCommand::new(["crcgen", "check-output", "config"], &config);
        let err = root.execute().unwrap_err();
        assert!(matches!(err, CommandError::Output(ref e) if e.is_invalid_extension()));
        assert!(config.is_started());
    }

    #[test]
    fn test_usage_renders() {
        let config = OutputConfig::new(FigmentReader);
        let root = RootCommand::new(["crcgen"], &config);
        assert!(root.render_usage().is_ok());
    }
}
