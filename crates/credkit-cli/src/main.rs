//! `credkit`: validate and decode credential numbers from the command line.
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod cmd;
mod error;
mod io;

use cli::{Cli, Command};
use error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.message());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let format = cli.format;
    match cli.command {
        Command::Validate { kind, values } => {
            let kit = cmd::build_kit(
                cli.domestic_regions.as_deref(),
                cli.international_regions.as_deref(),
            )?;
            let kind = cmd::resolve_kind(&kit, &kind)?;
            let values = io::read_values(&values)?;
            cmd::validate::run(&kit, &kind, &values, format)
        }
        Command::Parse { kind, values } => {
            let kit = cmd::build_kit(
                cli.domestic_regions.as_deref(),
                cli.international_regions.as_deref(),
            )?;
            let kind = cmd::resolve_kind(&kit, &kind)?;
            let values = io::read_values(&values)?;
            cmd::parse::run(&kit, &kind, &values, format)
        }
        Command::Kinds => cmd::kinds::run(&credkit_core::CredentialKit::with_defaults(), format),
        Command::CheckDigit { scheme, body } => cmd::check_digit::run(scheme, &body, format),
    }
}
