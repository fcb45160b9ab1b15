//! Rules and field decoders shared by the two residence permit kinds.
//!
//! Both permits follow the resident identity layout with a fixed region
//! prefix: `PPPPPP YYYYMMDD SSS C`.
use crate::check_digits::resident_id_check_digit;
use crate::error::CredentialError;
use crate::pipeline::{EvalContext, char_at, field, require_check_char};
use crate::record::ResidencePermitInfo;

use super::{parity_gender, require_past_birth_date};

pub fn check_birth_date(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_past_birth_date(ctx, field(text, 6..14))
}

pub fn check_digit(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    let body = field(text, 0..17);
    require_check_char(body, resident_id_check_digit(body), char_at(text, 17))
}

/// Writes birth date and gender.
pub(super) fn decode_person(text: &str, info: &mut ResidencePermitInfo) {
    info.birth_date = field(text, 6..14).to_owned();
    info.gender = parity_gender(text, 16);
}
