//! Error types of the credential kit.
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::enums::{CredentialKind, ErrorKind};

/// The reason a credential string was rejected.
///
/// Produced by the first failing rule of a processor. `fragment` is the slice
/// of normalized input the rule was looking at (empty when the whole input
/// was rejected), `detail` a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("[{}] {detail}", .kind.code())]
pub struct CredentialError {
    pub kind: ErrorKind,
    pub fragment: String,
    pub detail: String,
}

impl CredentialError {
    pub fn new(kind: ErrorKind, fragment: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            fragment: fragment.into(),
            detail: detail.into(),
        }
    }

    /// Shorthand for a [`ErrorKind::BasicFormat`] rejection of the whole input.
    pub fn basic_format(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::BasicFormat, String::new(), detail)
    }
}

/// A check-digit payload the scheme cannot weigh.
///
/// Distinct from a check-digit *mismatch*, which is the caller's comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckDigitError {
    /// A character outside the scheme's alphabet.
    #[error("character {ch:?} at position {position} is not valid for this check-digit scheme")]
    InvalidCharacter { ch: char, position: usize },
    /// The payload does not have the length the scheme weighs.
    #[error("expected {expected} characters, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// The façade was asked about a kind that has no registered processor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported credential kind: {0}")]
pub struct UnsupportedKind(pub CredentialKind);

/// Failure to load region reference tables.
#[derive(Debug, Error)]
pub enum RegionDataError {
    /// The file could not be opened.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The CSV reader failed (bad quoting, invalid UTF-8, I/O mid-read).
    #[error("{table} table: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },
    /// A row does not have the expected shape.
    #[error("{table} table, line {line}: {detail}")]
    Row {
        table: &'static str,
        line: u64,
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_error_display_carries_code() {
        let err = CredentialError::new(ErrorKind::Region, "880101", "unknown region code");
        assert_eq!(err.to_string(), "[REGION_ERROR] unknown region code");
        assert_eq!(err.fragment, "880101");
    }

    #[test]
    fn basic_format_has_empty_fragment() {
        let err = CredentialError::basic_format("empty input");
        assert_eq!(err.kind, ErrorKind::BasicFormat);
        assert!(err.fragment.is_empty());
    }

    #[test]
    fn unsupported_kind_names_the_code() {
        let err = UnsupportedKind(CredentialKind::Extension("driving-licence".to_owned()));
        assert_eq!(
            err.to_string(),
            "unsupported credential kind: driving-licence"
        );
    }

    #[test]
    fn check_digit_error_messages() {
        let err = CheckDigitError::WrongLength {
            expected: 17,
            actual: 3,
        };
        assert_eq!(err.to_string(), "expected 17 characters, got 3");
    }
}
