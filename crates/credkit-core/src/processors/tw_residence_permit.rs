//! Residence permits for Taiwan residents, always prefixed `830000`.
use std::sync::LazyLock;

use regex::Regex;

use crate::enums::CredentialKind;
use crate::error::CredentialError;
use crate::pipeline::{Chain, EvalContext, grammar, require_format};
use crate::record::TwResidencePermit;
use crate::region::DomesticRegion;

pub use super::residence::{check_birth_date, check_digit};

pub const LENGTHS: [usize; 1] = [18];

pub const REGION_CODE: &str = "830000";
pub const TAIWAN: &str = "台湾地区";

static GRAMMAR: LazyLock<Regex> = LazyLock::new(|| grammar(r"^830000\d{11}[0-9X]$"));

pub fn processor() -> Chain<TwResidencePermit> {
    Chain::new(CredentialKind::TwResidencePermit)
        .rule(check_format)
        .rule(check_birth_date)
        .rule(check_digit)
        .extract(extract_region)
        .extract(extract_person)
}

pub fn check_format(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_format(text, &LENGTHS, &GRAMMAR)
}

pub fn extract_region(_: &EvalContext<'_>, _: &str, info: &mut TwResidencePermit) {
    info.0.region = DomesticRegion::province(REGION_CODE, TAIWAN);
}

pub fn extract_person(_: &EvalContext<'_>, text: &str, info: &mut TwResidencePermit) {
    super::residence::decode_person(text, &mut info.0);
}
