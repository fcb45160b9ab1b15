/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `credkit` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. Region tables, stdin or the command
///   arguments could not be used, so no credential was judged.
/// - Exit code **1**: logical failure. Every value was judged and at least one
///   is not a valid credential.
use std::fmt;
use std::path::PathBuf;

use credkit_core::{RegionDataError, UnsupportedKind};

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `credkit` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound { path: PathBuf },

    /// The process lacks permission to read a file.
    PermissionDenied { path: PathBuf },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// `"-"` for stdin, `"stdout"` for output, otherwise the path.
        source: String,
        detail: String,
    },

    /// A region table was read but is malformed.
    RegionData { detail: String },

    /// Only one of the two region table flags was given.
    IncompleteRegionTables,

    /// No processor is registered for the requested kind.
    UnknownKind { code: String },

    /// The `check-digit` payload is not weighable by the scheme.
    InvalidBody { detail: String },

    // --- Exit code 1: logical failures ---
    /// At least one value was rejected. Per-value results have already been
    /// printed.
    InvalidCredentials { invalid: usize, total: usize },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::IoError { .. }
            | Self::RegionData { .. }
            | Self::IncompleteRegionTables
            | Self::UnknownKind { .. }
            | Self::InvalidBody { .. } => 2,

            Self::InvalidCredentials { .. } => 1,
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
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::RegionData { detail } => {
                format!("error: malformed region table: {detail}")
            }
            Self::IncompleteRegionTables => "error: --domestic-regions and \
                 --international-regions must be given together"
                .to_owned(),
            Self::UnknownKind { code } => {
                format!("error: unknown credential kind '{code}' (see `credkit kinds`)")
            }
            Self::InvalidBody { detail } => {
                format!("error: cannot compute check digit: {detail}")
            }
            Self::InvalidCredentials { invalid, total } => {
                format!("error: {invalid} of {total} values are not valid credentials")
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

impl From<UnsupportedKind> for CliError {
    fn from(err: UnsupportedKind) -> Self {
        Self::UnknownKind {
            code: err.0.code().to_owned(),
        }
    }
}

impl From<RegionDataError> for CliError {
    fn from(err: RegionDataError) -> Self {
        match err {
            RegionDataError::Io { path, source } => io_error(&source, path),
            other @ (RegionDataError::Csv { .. } | RegionDataError::Row { .. }) => {
                Self::RegionData {
                    detail: other.to_string(),
                }
            }
        }
    }
}

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
pub fn io_error(e: &std::io::Error, path: PathBuf) -> CliError {
    let kind = e.kind();
    if kind == std::io::ErrorKind::NotFound {
        CliError::FileNotFound { path }
    } else if kind == std::io::ErrorKind::PermissionDenied {
        CliError::PermissionDenied { path }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
