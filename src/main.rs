#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! crcgen: generate checksums with a validated output configuration.

mod bootstrap;
mod cli;
mod commands;
mod logger;
mod types;
mod writer;

use std::process::ExitCode;

use bootstrap::{Collaborators, Sequencer, StdExit, conclude};
use commands::RootCommand;
use logger::{Logger, LoggerConfig};
use writer::OutputConfig;

fn main() -> ExitCode {
    let root = RootCommand::new(std::env::args_os(), OutputConfig::shared());
    let logger = Logger::new(LoggerConfig::from_env());

    let sequencer = Sequencer::new(Collaborators {
        executor: &root,
        usage: &root,
        logger_init: &logger,
        logger_close: &logger,
    });

    conclude(sequencer.run(), &StdExit)
}
