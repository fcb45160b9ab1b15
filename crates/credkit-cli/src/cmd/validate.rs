//! Implementation of `credkit validate <KIND> <VALUE>...`.
//!
//! Prints one line per value to stdout: `valid` or `invalid` followed by the
//! value and, for rejections, the error code and detail. In `--format json`
//! mode each line is a JSON object.
//!
//! Exit codes: 0 = all valid, 1 = at least one invalid, 2 = input failure.
use credkit_core::{CredentialError, CredentialKind, CredentialKit};

use crate::cli::OutputFormat;
use crate::cmd::stdout_error;
use crate::error::CliError;

/// Runs the `validate` command.
///
/// # Errors
///
/// [`CliError::InvalidCredentials`] if any value is rejected,
/// [`CliError::UnknownKind`] for an unregistered kind.
pub fn run(
    kit: &CredentialKit,
    kind: &CredentialKind,
    values: &[String],
    format: OutputFormat,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut invalid = 0;
    for value in values {
        let outcome = kit.check(kind, value)?;
        if outcome.is_err() {
            invalid += 1;
        }
        match format {
            OutputFormat::Human => print_human(&mut out, value, &outcome),
            OutputFormat::Json => print_json(&mut out, kind, value, &outcome),
        }
        .map_err(|e| stdout_error(&e))?;
    }
    tracing::info!(kind = %kind, total = values.len(), invalid, "validation finished");
    if invalid == 0 {
        Ok(())
    } else {
        Err(CliError::InvalidCredentials {
            invalid,
            total: values.len(),
        })
    }
}

fn print_human<W: std::io::Write>(
    w: &mut W,
    value: &str,
    outcome: &Result<(), CredentialError>,
) -> std::io::Result<()> {
    match outcome {
        Ok(()) => writeln!(w, "valid    {value}"),
        Err(err) => writeln!(w, "invalid  {value}  {err}"),
    }
}

fn print_json<W: std::io::Write>(
    w: &mut W,
    kind: &CredentialKind,
    value: &str,
    outcome: &Result<(), CredentialError>,
) -> std::io::Result<()> {
    let line = serde_json::json!({
        "kind": kind.code(),
        "value": value,
        "valid": outcome.is_ok(),
        "error": outcome.as_ref().err(),
    });
    writeln!(w, "{line}")
}
