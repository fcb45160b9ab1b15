//! Implementation of `credkit kinds`.
//!
//! Lists every registered kind with its code, Chinese and English names. In
//! `--format json` mode a single JSON array is emitted.
use credkit_core::{CredentialKind, CredentialKit};

use crate::cli::OutputFormat;
use crate::cmd::stdout_error;
use crate::error::CliError;

/// Runs the `kinds` command.
///
/// # Errors
///
/// [`CliError::IoError`] if stdout cannot be written.
pub fn run(kit: &CredentialKit, format: OutputFormat) -> Result<(), CliError> {
    let kinds = kit.kinds();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => print_human(&mut out, &kinds),
        OutputFormat::Json => print_json(&mut out, &kinds),
    }
    .map_err(|e| stdout_error(&e))
}

fn print_human<W: std::io::Write>(w: &mut W, kinds: &[CredentialKind]) -> std::io::Result<()> {
    let width = kinds.iter().map(|k| k.code().len()).max().unwrap_or(0);
    for kind in kinds {
        writeln!(
            w,
            "{:<width$}  {}  {}",
            kind.code(),
            kind.zh_name(),
            kind.en_name()
        )?;
    }
    Ok(())
}

fn print_json<W: std::io::Write>(w: &mut W, kinds: &[CredentialKind]) -> std::io::Result<()> {
    let entries: Vec<serde_json::Value> = kinds
        .iter()
        .map(|kind| {
            serde_json::json!({
                "code": kind.code(),
                "zh_name": kind.zh_name(),
                "en_name": kind.en_name(),
            })
        })
        .collect();
    let json = serde_json::to_string_pretty(&entries).map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn human_lists_one_kind_per_line() {
        let mut buf = Vec::new();
        print_human(&mut buf, &CredentialKind::BUILT_IN).expect("write to vec");
        let text = String::from_utf8(buf).expect("utf-8");
        assert_eq!(text.lines().count(), 8);
        assert!(text.contains("passport-mrz"), "{text}");
        assert!(text.contains("统一社会信用代码"), "{text}");
    }

    #[test]
    fn json_is_an_array_of_codes() {
        let mut buf = Vec::new();
        print_json(&mut buf, &CredentialKind::BUILT_IN).expect("write to vec");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid JSON");
        let entries = value.as_array().expect("array");
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0]["code"], "mainland-resident-id");
    }
}
