/// Command modules for the `credkit` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or a
/// [`crate::error::CliError`] on failure.
use std::path::Path;
use std::sync::Arc;

use credkit_core::{CredentialKind, CredentialKit};

use crate::error::CliError;
use crate::io;

pub mod check_digit;
pub mod kinds;
pub mod parse;
pub mod validate;

/// Builds the kit, over replacement region tables when both paths are given.
///
/// # Errors
///
/// [`CliError::IncompleteRegionTables`] if only one path is given, otherwise
/// whatever loading the tables reports.
pub fn build_kit(
    domestic: Option<&Path>,
    international: Option<&Path>,
) -> Result<CredentialKit, CliError> {
    match (domestic, international) {
        (None, None) => Ok(CredentialKit::with_defaults()),
        (Some(domestic), Some(international)) => {
            let tables = io::load_region_tables(domestic, international)?;
            Ok(CredentialKit::with_regions(Arc::new(tables)))
        }
        (Some(_), None) | (None, Some(_)) => Err(CliError::IncompleteRegionTables),
    }
}

/// Resolves a `KIND` argument against the kit's registry.
///
/// # Errors
///
/// [`CliError::UnknownKind`] if no processor is registered for the code.
pub fn resolve_kind(kit: &CredentialKit, code: &str) -> Result<CredentialKind, CliError> {
    let kind = CredentialKind::from_code(code);
    if kit.is_registered(&kind) {
        Ok(kind)
    } else {
        Err(CliError::UnknownKind {
            code: code.to_owned(),
        })
    }
}

/// Wraps a stdout write failure.
pub fn stdout_error(e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}
