#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::wildcard_enum_match_arm)]

use clap::CommandFactory;

use super::*;

/// The root help output must contain all top-level subcommand names.
#[test]
fn root_help_lists_all_subcommands() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());
    for name in ["validate", "parse", "kinds", "check-digit"] {
        assert!(
            help.contains(name),
            "root help should mention subcommand '{name}'"
        );
    }
}

/// The root help output must describe every global flag.
#[test]
fn root_help_lists_global_flags() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());
    for flag in [
        "--format",
        "--verbose",
        "--domestic-regions",
        "--international-regions",
        "--help",
        "--version",
    ] {
        assert!(help.contains(flag), "root help should mention flag '{flag}'");
    }
}

#[test]
fn definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn validate_takes_kind_and_values() {
    let cli = Cli::try_parse_from(["credkit", "validate", "mainland-resident-id", "a", "b"])
        .expect("valid arguments");
    match cli.command {
        Command::Validate { kind, values } => {
            assert_eq!(kind, "mainland-resident-id");
            assert_eq!(values, ["a", "b"]);
        }
        other => panic!("expected validate, got {other:?}"),
    }
    assert_eq!(cli.format, OutputFormat::Human);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn validate_requires_a_value() {
    assert!(Cli::try_parse_from(["credkit", "validate", "passport-mrz"]).is_err());
}

#[test]
fn verbosity_counts_repeats() {
    let cli = Cli::try_parse_from(["credkit", "-vvv", "kinds"]).expect("valid arguments");
    assert_eq!(cli.verbose, 3);
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["credkit", "kinds", "--format", "json"])
        .expect("valid arguments");
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn check_digit_scheme_names() {
    let cli = Cli::try_parse_from(["credkit", "check-digit", "organization-code", "MA27Y4U4"])
        .expect("valid arguments");
    match cli.command {
        Command::CheckDigit { scheme, body } => {
            assert_eq!(scheme, Scheme::OrganizationCode);
            assert_eq!(body, "MA27Y4U4");
        }
        other => panic!("expected check-digit, got {other:?}"),
    }
    assert!(Cli::try_parse_from(["credkit", "check-digit", "luhn", "123"]).is_err());
}
