//! Implementation of `pintuan check <file>`.
//!
//! Runs the full import pipeline without persisting anything: parse the
//! order sheet, validate the extracted data, then import it into an
//! in-memory store and report the resulting summary to stdout.
//!
//! Validation issues are written to stderr, one line per issue, followed by
//! a count line (suppressed with `--quiet`). With `--verbose`, parse timing
//! is written to stderr.
//!
//! Exit codes:
//! - 0 = the sheet parses, validates, and imports cleanly
//! - 1 = malformed sheet, validation issues, or a failed dry-run import
//! - 2 = unreadable workbook
use std::io::Write;
use std::time::Instant;

use pintuan_core::{
    ImportData, ImportSummary, MemoryStore, PersistError, import_into, validate_import,
};
use pintuan_excel::{ParseOptions, parse_import};

use super::parse_error_to_cli;
use crate::OutputFormat;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_issue, write_issue_count, write_timing};

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `check` command.
///
/// # Errors
///
/// - [`CliError::WorkbookUnreadable`] (exit code 2) if the bytes are not a
///   workbook.
/// - [`CliError::ParseFailed`] (exit code 1) if the sheet is malformed.
/// - [`CliError::ValidationFailed`] (exit code 1) if the extracted data
///   fails validation; the issues are printed to stderr first.
/// - [`CliError::ImportFailed`] (exit code 1) if the dry-run import fails.
pub fn run(
    bytes: &[u8],
    sheet: Option<&str>,
    format: &OutputFormat,
    quiet: bool,
    verbose: bool,
    no_color: bool,
) -> Result<(), CliError> {
    let config = FormatterConfig::from_flags(no_color, quiet, verbose);

    let started = Instant::now();
    let data =
        parse_import(bytes, ParseOptions { sheet_name: sheet }).map_err(parse_error_to_cli)?;

    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();
    write_timing(&mut err_out, "parsed", started.elapsed(), &config).map_err(stderr_io_error)?;

    check_data(&data, format, &config, &mut err_out)
}

/// Validates `data` and dry-runs the import, printing the summary to stdout.
fn check_data<W: Write>(
    data: &ImportData,
    format: &OutputFormat,
    config: &FormatterConfig,
    err_out: &mut W,
) -> Result<(), CliError> {
    if let Err(e) = validate_import(data) {
        for issue in &e.issues {
            write_issue(err_out, issue, format, config).map_err(stderr_io_error)?;
        }
        write_issue_count(err_out, e.issues.len(), format, config).map_err(stderr_io_error)?;
        return Err(CliError::ValidationFailed);
    }

    let started = Instant::now();
    let mut store = MemoryStore::new();
    let summary = import_into(&mut store, data).map_err(|e| match e {
        PersistError::Validation(_) => CliError::ValidationFailed,
        PersistError::UnknownProduct { product } => CliError::ImportFailed {
            detail: format!("unknown product type {product:?}"),
        },
        PersistError::Store(never) => match never {},
    })?;
    write_timing(err_out, "imported", started.elapsed(), config).map_err(stderr_io_error)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => print_summary_human(&mut out, &summary),
        OutputFormat::Json => print_summary_json(&mut out, &summary),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

/// Writes the import summary in human-readable aligned format.
fn print_summary_human<W: Write>(w: &mut W, summary: &ImportSummary) -> std::io::Result<()> {
    writeln!(
        w,
        "period:         {} (id {})",
        summary.period_name, summary.period_id
    )?;
    writeln!(w, "orders:         {}", summary.total_orders)?;
    writeln!(w, "total_amount:   {}", summary.total_amount)
}

/// Writes the import summary as a single JSON object.
fn print_summary_json<W: Write>(w: &mut W, summary: &ImportSummary) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}

fn stderr_io_error(e: std::io::Error) -> CliError {
    CliError::IoError {
        source: "stderr".to_owned(),
        detail: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
