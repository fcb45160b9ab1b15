//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI commands.
///
/// `Human` prints aligned text to stdout. `Json` prints one JSON object per
/// line (NDJSON) for per-value commands and a single document otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default).
    Human,
    /// Structured JSON / NDJSON output.
    Json,
}

/// Check-digit scheme for the `check-digit` subcommand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Scheme {
    /// Resident identity number: 17 digits.
    ResidentId,
    /// Unified social credit code: 17 characters.
    CreditCode,
    /// Organization code: 8 characters.
    OrganizationCode,
    /// Machine readable zone field: any length.
    Mrz,
}

/// All top-level subcommands exposed by the `credkit` binary.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate credential numbers; exits 1 if any is invalid.
    Validate {
        /// Credential kind code, e.g. `mainland-resident-id` (see `credkit kinds`).
        #[arg(value_name = "KIND")]
        kind: String,
        /// Values to validate, or `-` to read one value per line from stdin.
        #[arg(value_name = "VALUE", required = true, num_args = 1..)]
        values: Vec<String>,
    },

    /// Decode credential numbers into their fields; exits 1 if any is invalid.
    Parse {
        /// Credential kind code (see `credkit kinds`).
        #[arg(value_name = "KIND")]
        kind: String,
        /// Values to decode, or `-` to read one value per line from stdin.
        #[arg(value_name = "VALUE", required = true, num_args = 1..)]
        values: Vec<String>,
    },

    /// List the supported credential kinds.
    Kinds,

    /// Compute the check character of a payload.
    CheckDigit {
        /// Check-digit scheme.
        #[arg(value_name = "SCHEME", value_enum)]
        scheme: Scheme,
        /// Payload without its check character.
        #[arg(value_name = "BODY")]
        body: String,
    },
}

/// Validate and decode Chinese identity and organization credential numbers.
#[derive(Parser, Debug)]
#[command(name = "credkit", version, about)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    ///
    /// `RUST_LOG` overrides the level chosen here.
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Domestic region table (CSV: code,name) replacing the bundled one.
    ///
    /// Must be given together with `--international-regions`.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "CREDKIT_DOMESTIC_REGIONS"
    )]
    pub domestic_regions: Option<PathBuf>,

    /// International region table (CSV, seven columns) replacing the bundled
    /// one.
    ///
    /// Must be given together with `--domestic-regions`.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "CREDKIT_INTERNATIONAL_REGIONS"
    )]
    pub international_regions: Option<PathBuf>,
}

#[cfg(test)]
mod tests;
