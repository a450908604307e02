/// Output formatting: JSON and table modes. TTY detection.
use std::io::{IsTerminal, Write};

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use super::args::OutputFormat;
use crate::types::{ConfigEntryOutput, OutputConfigReport};

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, no_header: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            no_header,
        }
    }
}

// --- Output configuration report ---

/// Write a loaded output configuration to `out`.
///
/// # Errors
///
/// Returns an I/O error if writing fails, or a serialization error wrapped in
/// `std::io::Error` if JSON rendering fails.
pub fn write_report(
    report: &OutputConfigReport,
    ctx: &OutputCtx,
    out: &mut impl Write,
) -> std::io::Result<()> {
    match ctx.format {
        OutputFormat::Json => write_json(out, report, true),
        OutputFormat::Compact => write_json(out, report, false),
        OutputFormat::Table | OutputFormat::Auto => write_report_table(report, ctx, out),
    }
}

fn write_report_table(
    report: &OutputConfigReport,
    ctx: &OutputCtx,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["KEY", "KIND", "VALUE"]);
    }
    for entry in &report.entries {
        table.add_row([
            entry.key.as_str(),
            entry.kind.as_str(),
            &render_value(entry),
        ]);
    }

    if !ctx.no_header {
        writeln!(out, "{} ({})", report.path, report.format)?;
    }
    writeln!(out, "{table}")
}

/// Strings are shown bare; everything else as compact JSON.
fn render_value(entry: &ConfigEntryOutput) -> String {
    match entry.value.as_str() {
        Some(s) => s.to_owned(),
        None => entry.value.to_string(),
    }
}

// --- Generic JSON helpers ---

fn write_json<T: Serialize + ?Sized>(
    out: &mut impl Write,
    value: &T,
    pretty: bool,
) -> std::io::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    writeln!(out, "{}", rendered.map_err(std::io::Error::other)?)
}
