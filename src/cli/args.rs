/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// crcgen: generate checksums with a validated output configuration.
#[derive(Debug, Parser)]
#[command(
    name = "crcgen",
    about = "Generate checksums for files, with a validated output configuration",
    version
)]
pub struct Cli {
    /// Output format. Auto-detects: table when TTY, json when piped.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "auto")]
    pub format: OutputFormat,

    /// Shorthand for --format json.
    #[arg(long, global = true, conflicts_with = "format")]
    pub json: bool,

    /// Omit table headers (useful for awk/cut processing).
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Without a subcommand, usage text is printed.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when stdout is a TTY, json when piped.
    #[default]
    Auto,
    /// JSON array or object (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Aligned table with headers (human-readable).
    Table,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate and load an output configuration file, then print its entries.
    CheckOutput(CheckOutputArgs),
}

/// Arguments for `crcgen check-output`.
#[derive(Debug, Parser)]
pub struct CheckOutputArgs {
    /// Path to the output configuration (.json, .yaml or .yml).
    pub path: PathBuf,

    /// Print only the value under this dotted key (e.g. "output.file").
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,
}
