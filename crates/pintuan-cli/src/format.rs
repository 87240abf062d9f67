/// Diagnostic formatting: human-readable and JSON (NDJSON) modes.
///
/// This module implements two output strategies for
/// [`pintuan_core::ValidationIssue`] values:
///
/// - **Human mode** (default): one line per issue, with a color-coded `[E]`
///   tag on stderr. Colors are disabled when `--no-color` is set, the
///   `NO_COLOR` environment variable is present (per <https://no-color.org>),
///   or stderr is not a TTY.
/// - **JSON mode**: each issue is serialized as a single-line JSON object
///   (NDJSON) to stderr.
///
/// Both modes support a **quiet** flag (suppress the summary line) and a
/// **verbose** flag (add timing). Issues themselves are never suppressed;
/// every issue is an error.
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use pintuan_core::ValidationIssue;

use crate::OutputFormat;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stderr.
///
/// Colors are disabled when any of the following conditions hold:
/// - `no_color_flag` is `true` (the `--no-color` CLI flag was passed).
/// - The `NO_COLOR` environment variable is present (any value).
/// - stderr is not a TTY (e.g. the output is piped to a file).
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

// ---------------------------------------------------------------------------
// ANSI escape sequences
// ---------------------------------------------------------------------------

const ANSI_RED: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for the issue formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress summary and progress stderr output.
    pub quiet: bool,
    /// Emit timing to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    ///
    /// `no_color_flag` is the `--no-color` boolean. Color detection also
    /// checks the `NO_COLOR` env var and the stderr TTY state.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

// ---------------------------------------------------------------------------
// Issue formatting
// ---------------------------------------------------------------------------

/// Writes a single [`ValidationIssue`] to `writer` in human-readable format.
///
/// Format: `[E] orders[0].nickname: must not be empty`
///
/// The `[E]` tag is wrapped in red ANSI codes when `config.colors` is `true`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_issue_human<W: Write>(
    writer: &mut W,
    issue: &ValidationIssue,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.colors {
        writeln!(
            writer,
            "{ANSI_RED}[E]{ANSI_RESET} {path}: {message}",
            path = issue.path,
            message = issue.message,
        )
    } else {
        writeln!(
            writer,
            "[E] {path}: {message}",
            path = issue.path,
            message = issue.message,
        )
    }
}

/// Writes a single [`ValidationIssue`] to `writer` as a NDJSON line.
///
/// Each line is a self-contained JSON object:
/// ```json
/// {"path":"orders[0].nickname","message":"must not be empty"}
/// ```
///
/// # Errors
///
/// Returns an error only if serialization or writing to `writer` fails.
pub fn write_issue_json<W: Write>(writer: &mut W, issue: &ValidationIssue) -> std::io::Result<()> {
    let line = serde_json::to_string(issue).map_err(std::io::Error::other)?;
    writeln!(writer, "{line}")
}

/// Writes a single [`ValidationIssue`] to `writer` in the requested format.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_issue<W: Write>(
    writer: &mut W,
    issue: &ValidationIssue,
    format: &OutputFormat,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => write_issue_human(writer, issue, config),
        OutputFormat::Json => write_issue_json(writer, issue),
    }
}

// ---------------------------------------------------------------------------
// Summary and timing
// ---------------------------------------------------------------------------

/// Writes a final issue-count line to `writer`.
///
/// Human format: `2 validation issues found`. JSON format:
/// `{"summary":{"issues":2}}`. Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_issue_count<W: Write>(
    writer: &mut W,
    count: usize,
    format: &OutputFormat,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    match format {
        OutputFormat::Human => {
            writeln!(
                writer,
                "{count} validation {} found",
                pluralize(count, "issue", "issues")
            )
        }
        OutputFormat::Json => {
            writeln!(writer, r#"{{"summary":{{"issues":{count}}}}}"#)
        }
    }
}

/// Writes timing information to `writer` in verbose mode.
///
/// This is a no-op when `config.verbose` is `false`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

/// Returns the singular or plural form of a word depending on `count`.
fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
