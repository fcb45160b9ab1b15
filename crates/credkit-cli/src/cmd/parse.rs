//! Implementation of `credkit parse <KIND> <VALUE>...`.
//!
//! Human mode prints the value followed by its decoded fields, or by the
//! rejection reason. JSON mode prints one object per value with either a
//! `record` or an `error` member.
//!
//! Exit codes: 0 = all decoded, 1 = at least one invalid, 2 = input failure.
use credkit_core::{CredentialError, CredentialKind, CredentialKit, ParsedRecord};

use crate::cli::OutputFormat;
use crate::cmd::stdout_error;
use crate::error::CliError;

/// Runs the `parse` command.
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
        let outcome = kit.decode(kind, value)?;
        if outcome.is_err() {
            invalid += 1;
        }
        match format {
            OutputFormat::Human => print_human(&mut out, value, &outcome),
            OutputFormat::Json => print_json(&mut out, value, &outcome),
        }
        .map_err(|e| stdout_error(&e))?;
    }
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
    outcome: &Result<ParsedRecord, CredentialError>,
) -> std::io::Result<()> {
    writeln!(w, "{value}")?;
    match outcome {
        Ok(record) => {
            for line in record.to_string().lines() {
                writeln!(w, "  {line}")?;
            }
        }
        Err(err) => writeln!(w, "  invalid: {err}")?,
    }
    Ok(())
}

fn print_json<W: std::io::Write>(
    w: &mut W,
    value: &str,
    outcome: &Result<ParsedRecord, CredentialError>,
) -> std::io::Result<()> {
    let line = match outcome {
        Ok(record) => serde_json::json!({ "value": value, "record": record }),
        Err(err) => serde_json::json!({ "value": value, "error": err }),
    };
    writeln!(w, "{line}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn decode(kind: CredentialKind, value: &str) -> Result<ParsedRecord, CredentialError> {
        CredentialKit::with_defaults()
            .decode(&kind, value)
            .expect("built-in kind")
    }

    #[test]
    fn human_record_is_indented_under_value() {
        let mut buf = Vec::new();
        let outcome = decode(CredentialKind::HkMoTravelPermit, "H1234567802");
        print_human(&mut buf, "H1234567802", &outcome).expect("write to vec");
        let text = String::from_utf8(buf).expect("utf-8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("H1234567802"));
        assert_eq!(lines.next(), Some("  hk-mo-travel-permit"));
        assert!(text.contains("replacements: 2"), "{text}");
    }

    #[test]
    fn human_rejection() {
        let mut buf = Vec::new();
        let outcome = decode(CredentialKind::HkMoTravelPermit, "X1234567802");
        print_human(&mut buf, "X1234567802", &outcome).expect("write to vec");
        let text = String::from_utf8(buf).expect("utf-8");
        assert!(text.contains("invalid: [BASIC_FORMAT_ERROR]"), "{text}");
    }

    #[test]
    fn json_record_is_tagged() {
        let mut buf = Vec::new();
        let outcome = decode(CredentialKind::UnifiedSocialCreditCode, "91330106MA27Y4U47R");
        print_json(&mut buf, "91330106MA27Y4U47R", &outcome).expect("write to vec");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid JSON");
        assert_eq!(value["record"]["kind"], "unified_social_credit_code");
        assert_eq!(value["record"]["region"]["code"], "330106");
        assert!(value.get("error").is_none());
    }
}
