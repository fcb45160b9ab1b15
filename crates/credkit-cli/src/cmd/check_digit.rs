//! Implementation of `credkit check-digit <SCHEME> <BODY>`.
//!
//! Prints the check character of `BODY` (trimmed and upper-cased first).
use std::io::Write as _;

use credkit_core::{
    CheckDigitError, credit_code_check_digit, mrz_check_digit, normalize,
    organization_code_check_digit, resident_id_check_digit,
};

use crate::cli::{OutputFormat, Scheme};
use crate::cmd::stdout_error;
use crate::error::CliError;

/// Computes the check character of `body` under `scheme`.
///
/// # Errors
///
/// [`CheckDigitError`] if the body has the wrong length or a character
/// outside the scheme's alphabet.
pub fn compute(scheme: Scheme, body: &str) -> Result<char, CheckDigitError> {
    match scheme {
        Scheme::ResidentId => resident_id_check_digit(body),
        Scheme::CreditCode => credit_code_check_digit(body),
        Scheme::OrganizationCode => organization_code_check_digit(body),
        Scheme::Mrz => mrz_check_digit(body),
    }
}

/// Runs the `check-digit` command.
///
/// # Errors
///
/// [`CliError::InvalidBody`] (exit 2) if the body cannot be weighed.
pub fn run(scheme: Scheme, body: &str, format: OutputFormat) -> Result<(), CliError> {
    let body = normalize(body);
    let check = compute(scheme, &body).map_err(|e| CliError::InvalidBody {
        detail: e.to_string(),
    })?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => writeln!(out, "{check}"),
        OutputFormat::Json => writeln!(
            out,
            "{}",
            serde_json::json!({ "body": body, "check_digit": check.to_string() })
        ),
    }
    .map_err(|e| stdout_error(&e))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn every_scheme() {
        assert_eq!(compute(Scheme::ResidentId, "33010519781027002"), Ok('5'));
        assert_eq!(compute(Scheme::CreditCode, "91330106MA27Y4U47"), Ok('R'));
        assert_eq!(compute(Scheme::OrganizationCode, "MA27Y4U4"), Ok('7'));
        assert_eq!(compute(Scheme::Mrz, "G48947646"), Ok('4'));
    }

    #[test]
    fn wrong_length_is_reported() {
        let err = compute(Scheme::ResidentId, "1234").expect_err("too short");
        assert_eq!(
            err,
            CheckDigitError::WrongLength {
                expected: 17,
                actual: 4
            }
        );
    }
}
