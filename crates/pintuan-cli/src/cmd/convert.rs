//! Implementation of `pintuan convert <file>`.
//!
//! Parses an order sheet into the typed import data and serializes it as
//! pretty-printed JSON with the application field names (`periodName`,
//! `productTypes`, `unitPrice`, ...).
//!
//! Flags:
//! - `-o/--output <PATH>`: write the JSON to a file instead of stdout.
//!
//! Exit codes: 0 = success, 1 = malformed sheet, 2 = unreadable workbook.
use std::path::Path;

use pintuan_excel::{ParseOptions, parse_import};

use super::parse_error_to_cli;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `convert` command.
///
/// Parses `bytes` as an order sheet workbook and writes the extracted import
/// data as pretty-printed JSON to `output`, or to stdout when `output` is
/// `None`.
///
/// # Errors
///
/// - [`CliError::WorkbookUnreadable`] (exit code 2) if the bytes are not a
///   workbook.
/// - [`CliError::ParseFailed`] (exit code 1) if the sheet is malformed.
/// - [`CliError::IoError`] if the output cannot be written.
pub fn run(bytes: &[u8], sheet: Option<&str>, output: Option<&Path>) -> Result<(), CliError> {
    let data = parse_import(bytes, ParseOptions { sheet_name: sheet }).map_err(parse_error_to_cli)?;

    let json = serde_json::to_string_pretty(&data).map_err(|e| CliError::IoError {
        source: "serializer".to_owned(),
        detail: e.to_string(),
    })?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n")).map_err(|e| CliError::IoError {
                source: path.display().to_string(),
                detail: e.to_string(),
            })
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            std::io::Write::write_fmt(&mut out, format_args!("{json}\n")).map_err(|e| {
                CliError::IoError {
                    source: "stdout".to_owned(),
                    detail: e.to_string(),
                }
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
