//! Mainland travel permits for Hong Kong and Macao residents.
//!
//! `H` or `M` followed by eight digits, optionally followed by a two-digit
//! replacement count.
use std::sync::LazyLock;

use regex::Regex;

use crate::enums::CredentialKind;
use crate::error::CredentialError;
use crate::pipeline::{Chain, EvalContext, char_at, field, grammar, require_format};
use crate::record::{HkMoTravelPermitInfo, NO_REPLACEMENT_COUNT};
use crate::region::DomesticRegion;

pub const LENGTHS: [usize; 2] = [9, 11];

pub const HONG_KONG: &str = "香港特别行政区";
pub const MACAO: &str = "澳门特别行政区";

static GRAMMAR: LazyLock<Regex> = LazyLock::new(|| grammar(r"^[HM](\d{8}|\d{10})$"));

pub fn processor() -> Chain<HkMoTravelPermitInfo> {
    Chain::new(CredentialKind::HkMoTravelPermit)
        .rule(check_format)
        .extract(extract_region)
        .extract(extract_replacement_count)
}

pub fn check_format(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_format(text, &LENGTHS, &GRAMMAR)
}

/// The leading letter doubles as the region code.
pub fn extract_region(_: &EvalContext<'_>, text: &str, info: &mut HkMoTravelPermitInfo) {
    let code = field(text, 0..1);
    info.region = match char_at(text, 0) {
        'H' => DomesticRegion::province(code, HONG_KONG),
        'M' => DomesticRegion::province(code, MACAO),
        _ => DomesticRegion {
            code: code.to_owned(),
            ..DomesticRegion::default()
        },
    };
}

pub fn extract_replacement_count(
    _: &EvalContext<'_>,
    text: &str,
    info: &mut HkMoTravelPermitInfo,
) {
    info.replacement_count = replacement_count(text, 9..11);
}

/// Two-digit replacement count at `range`, or [`NO_REPLACEMENT_COUNT`] if
/// the permit is too short to carry one.
pub(super) fn replacement_count(text: &str, range: std::ops::Range<usize>) -> i32 {
    text.get(range)
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(NO_REPLACEMENT_COUNT)
}
