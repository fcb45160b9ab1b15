//! Residence permits for Hong Kong (`810000`) and Macao (`820000`)
//! residents.
use std::sync::LazyLock;

use regex::Regex;

use crate::enums::CredentialKind;
use crate::error::CredentialError;
use crate::pipeline::{Chain, EvalContext, field, grammar, require_format};
use crate::record::HkMoResidencePermit;
use crate::region::DomesticRegion;

use super::hk_mo_travel_permit::{HONG_KONG, MACAO};
pub use super::residence::{check_birth_date, check_digit};

pub const LENGTHS: [usize; 1] = [18];

static GRAMMAR: LazyLock<Regex> = LazyLock::new(|| grammar(r"^8[12]0000\d{11}[0-9X]$"));

pub fn processor() -> Chain<HkMoResidencePermit> {
    Chain::new(CredentialKind::HkMoResidencePermit)
        .rule(check_format)
        .rule(check_birth_date)
        .rule(check_digit)
        .extract(extract_region)
        .extract(extract_person)
}

pub fn check_format(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_format(text, &LENGTHS, &GRAMMAR)
}

pub fn extract_region(_: &EvalContext<'_>, text: &str, info: &mut HkMoResidencePermit) {
    let code = field(text, 0..6);
    let name = if code == "820000" { MACAO } else { HONG_KONG };
    info.0.region = DomesticRegion::province(code, name);
}

pub fn extract_person(_: &EvalContext<'_>, text: &str, info: &mut HkMoResidencePermit) {
    super::residence::decode_person(text, &mut info.0);
}
