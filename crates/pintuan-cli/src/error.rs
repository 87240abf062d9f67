/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `pintuan` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2** — input failure: the tool could not read the input at
///   all (missing file, size limit, bytes that are not a workbook). These
///   errors terminate early before any sheet logic runs.
/// - Exit code **1** — logical failure: the workbook was readable but the
///   order sheet inside it is malformed, or the extracted data failed a
///   later stage (validation, dry-run import).
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `pintuan` CLI can produce.
///
/// Use [`CliError::exit_code`] to obtain the exit code associated with each
/// variant. [`CliError::message`] returns the human-readable error string
/// that should be printed to stderr before exiting.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// A human-readable label for the source (`"-"` for stdin, or the
        /// filesystem path).
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (disk files only; `None` for
        /// stdin where the exact size is unknown).
        actual: Option<u64>,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// A human-readable label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input bytes could not be opened as an `.xlsx` workbook.
    WorkbookUnreadable {
        /// The underlying reader error message.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// The workbook opened but the order sheet inside it is malformed.
    ParseFailed {
        /// The stable machine-readable error code (e.g. `MISSING_TITLE_ROW`).
        code: &'static str,
        /// The human-readable error message.
        detail: String,
    },

    /// The extracted import data failed validation.
    ///
    /// The individual issues have already been printed; this variant exists
    /// so `main` can call `process::exit(1)` cleanly.
    ValidationFailed,

    /// A dry-run import could not be completed.
    ImportFailed {
        /// A description of the failure.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2` — input failure (file not found, unreadable workbook, etc.).
    /// - `1` — logical failure (malformed sheet, validation issues, etc.).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::WorkbookUnreadable { .. } => 2,

            Self::ParseFailed { .. } | Self::ValidationFailed | Self::ImportFailed { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::WorkbookUnreadable { detail } => {
                format!("error: cannot read workbook: {detail}")
            }
            Self::ParseFailed { code, detail } => {
                format!("error: {detail} ({code})")
            }
            Self::ValidationFailed => "error: import data failed validation".to_owned(),
            Self::ImportFailed { detail } => {
                format!("error: import failed: {detail}")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
