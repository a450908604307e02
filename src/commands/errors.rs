/// Errors from the command layer.
use std::io;

use thiserror::Error;

use crate::bootstrap::errors::FAILURE_EXIT_CODE;
use crate::writer::{WriterError, is_invalid_ext_err, is_invalid_file_err};

/// Exit code for a rejected output path or an unknown `--key`.
pub const INVALID_INPUT_EXIT_CODE: i32 = 4;

/// Errors that can occur while parsing arguments or running a subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command line could not be parsed.
    #[error(transparent)]
    Arguments(#[from] clap::Error),

    /// The output configuration was rejected or could not be loaded.
    #[error(transparent)]
    Output(#[from] WriterError),

    /// A `--key` lookup found nothing in the loaded configuration.
    #[error("No entry matches key '{key}'")]
    KeyNotFound {
        /// The dotted key that was searched.
        key: String,
    },

    /// Writing command output failed.
    #[error("could not write output: {0}")]
    Io(#[from] io::Error),
}

/// Exit code mapping for `CommandError` variants.
impl CommandError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(err) => err.exit_code(),
            Self::Output(err) => {
                if is_invalid_file_err(err) || is_invalid_ext_err(err) {
                    INVALID_INPUT_EXIT_CODE
                } else {
                    FAILURE_EXIT_CODE
                }
            }
            Self::KeyNotFound { .. } => INVALID_INPUT_EXIT_CODE,
            Self::Io(_) => FAILURE_EXIT_CODE,
        }
    }
}
