/// `check-output` command: validate and load an output configuration.
use std::io::Write;

use crate::cli::OutputCtx;
use crate::cli::args::CheckOutputArgs;
use crate::cli::output::write_report;
use crate::types::{ConfigEntryOutput, OutputConfigReport};
use crate::writer::OutputConfig;

use super::CommandError;

/// Run `crcgen check-output`.
///
/// The configuration is loaded through `config`, so only the first path
/// loaded in a process is ever read.
///
/// # Errors
///
/// Returns `CommandError::Output` if the path is rejected or the file cannot
/// be parsed, `CommandError::KeyNotFound` if `--key` matches nothing, and
/// `CommandError::Io` if writing the report fails.
pub fn run(
    args: &CheckOutputArgs,
    ctx: &OutputCtx,
    config: &OutputConfig,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if config.is_started() {
        tracing::debug!("output configuration already loaded, reusing first result");
    }
    let store = config.start(&args.path)?;
    if store.is_empty() {
        tracing::warn!(path = %store.path().display(), "output configuration has no entries");
    }

    let entries = match &args.key {
        Some(key) => {
            let value = store.lookup(key).ok_or_else(|| CommandError::KeyNotFound {
                key: key.clone(),
            })?;
            vec![ConfigEntryOutput::new(key, value)]
        }
        None => store
            .entries()
            .map(|(key, value)| ConfigEntryOutput::new(key, value))
            .collect(),
    };

    let report = OutputConfigReport {
        path: store.path().display().to_string(),
        format: store.format().to_string(),
        entries,
    };
    write_report(&report, ctx, out)?;
    Ok(())
}
