//! One processor per built-in credential kind.
//!
//! Each module exposes `processor()`, building the kind's [`Chain`], and its
//! rules and extractors as plain functions so they can be reused or
//! recombined by extension processors.
use crate::dates::{is_past_date, parse_compact_date};
use crate::enums::{ErrorKind, Gender};
use crate::error::CredentialError;
use crate::pipeline::{EvalContext, char_at};
use crate::region::DomesticRegion;

pub mod foreign_permanent_residence;
pub mod hk_mo_residence_permit;
pub mod hk_mo_travel_permit;
pub mod passport_mrz;
pub mod resident_id;
mod residence;
pub mod social_credit_code;
pub mod tw_residence_permit;
pub mod tw_travel_permit;

#[cfg(test)]
pub(crate) mod test_support;

/// Looks up a domestic region, falling back to a bare code entry.
fn domestic_region(ctx: &EvalContext<'_>, code: &str) -> DomesticRegion {
    ctx.regions
        .domestic(code)
        .cloned()
        .unwrap_or_else(|| DomesticRegion {
            code: code.to_owned(),
            ..DomesticRegion::default()
        })
}

/// Rejects a domestic region code missing from the tables.
fn require_domestic(ctx: &EvalContext<'_>, code: &str) -> Result<(), CredentialError> {
    match ctx.regions.domestic(code) {
        Some(_) => Ok(()),
        None => Err(CredentialError::new(
            ErrorKind::Region,
            code,
            format!("region code {code} is unknown"),
        )),
    }
}

/// Rejects a `YYYYMMDD` birth date that is illegal or after today.
fn require_past_birth_date(ctx: &EvalContext<'_>, date: &str) -> Result<(), CredentialError> {
    if is_past_date(date, ctx.today) {
        return Ok(());
    }
    let detail = match parse_compact_date(date) {
        Some(parsed) if parsed > ctx.today => format!("birth date {date} is in the future"),
        _ => format!("birth date {date} is not a calendar date"),
    };
    Err(CredentialError::new(ErrorKind::BirthDate, date, detail))
}

/// Gender from the parity of the digit at byte `index`.
fn parity_gender(text: &str, index: usize) -> Gender {
    u8::try_from(char_at(text, index)).map_or(Gender::Unknown, Gender::from_parity_digit)
}
