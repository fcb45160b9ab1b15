/// Input reading for the `credkit` binary.
///
/// `credkit-core` never touches the filesystem or stdin; all reading happens
/// here and every failure is converted to a [`CliError`] with exit code 2.
use std::io::BufRead;
use std::path::Path;

use credkit_core::RegionTables;

use crate::error::CliError;

/// The stdin sentinel accepted in place of a value.
pub const STDIN: &str = "-";

// ---------------------------------------------------------------------------
// Credential values
// ---------------------------------------------------------------------------

/// Expands the `VALUE` arguments, replacing each `-` with the lines of stdin.
///
/// Stdin is read at most once; a second `-` contributes nothing.
///
/// # Errors
///
/// [`CliError::IoError`] if stdin cannot be read.
pub fn read_values(args: &[String]) -> Result<Vec<String>, CliError> {
    let mut values = Vec::with_capacity(args.len());
    let mut stdin_read = false;
    for arg in args {
        if arg != STDIN {
            values.push(arg.clone());
        } else if !stdin_read {
            stdin_read = true;
            let stdin = std::io::stdin();
            let lines = read_lines(stdin.lock()).map_err(|e| CliError::IoError {
                source: STDIN.to_owned(),
                detail: e.to_string(),
            })?;
            tracing::debug!(count = lines.len(), "read values from stdin");
            values.extend(lines);
        }
    }
    Ok(values)
}

/// One value per line, blank lines skipped, line endings stripped.
fn read_lines<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut values = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let value = line.trim_end_matches('\r');
        if !value.trim().is_empty() {
            values.push(value.to_owned());
        }
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Region tables
// ---------------------------------------------------------------------------

/// Loads replacement region tables.
///
/// # Errors
///
/// [`CliError::FileNotFound`], [`CliError::PermissionDenied`] or
/// [`CliError::IoError`] if a file cannot be opened and
/// [`CliError::RegionData`] if it is malformed.
pub fn load_region_tables(domestic: &Path, international: &Path) -> Result<RegionTables, CliError> {
    let tables = RegionTables::from_csv_paths(domestic, international)?;
    tracing::info!(
        domestic = tables.domestic_len(),
        international = tables.international_len(),
        "loaded region tables from {} and {}",
        domestic.display(),
        international.display()
    );
    Ok(tables)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
