//! Foreign permanent residence identity cards.
//!
//! ```text
//! 15 chars (2004 card): NNN RRRR YYMMDD SS C   NNN = ISO alpha-3 nationality
//! 18 chars (2017 card): 9 PP NNN YYYYMMDD SSS C
//! ```
//!
//! The 15-character card carries an MRZ-style check digit over its first
//! fourteen characters and a four-digit region prefix; the 18-character card
//! reuses the resident identity layout with a province prefix and an ISO
//! numeric nationality.
use std::sync::LazyLock;

use regex::Regex;

use crate::check_digits::{mrz_check_digit, resident_id_check_digit};
use crate::dates::resolve_short_date;
use crate::enums::{CredentialKind, ErrorKind};
use crate::error::CredentialError;
use crate::pipeline::{
    Chain, EvalContext, char_at, field, grammar, require_check_char, require_format,
};
use crate::record::ForeignPermanentResidenceInfo;
use crate::region::InternationalRegion;

use super::{domestic_region, parity_gender, require_domestic, require_past_birth_date};

pub const LENGTHS: [usize; 2] = [15, 18];

static GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^([A-Z]{3}\d{12}|9\d{16}[0-9X])$"));

pub fn processor() -> Chain<ForeignPermanentResidenceInfo> {
    Chain::new(CredentialKind::ForeignPermanentResidenceId)
        .rule(check_format)
        .rule(check_nationality)
        .rule(check_region)
        .rule(check_birth_date)
        .rule(check_digit)
        .extract(extract_nationality)
        .extract(extract_region)
        .extract(extract_birth_date)
        .extract(extract_gender)
}

fn is_legacy(text: &str) -> bool {
    text.len() == 15
}

fn region_code(text: &str) -> String {
    if is_legacy(text) {
        format!("{}00", field(text, 3..7))
    } else {
        format!("{}0000", field(text, 1..3))
    }
}

fn nationality<'a>(ctx: &EvalContext<'a>, text: &str) -> Option<&'a InternationalRegion> {
    if is_legacy(text) {
        ctx.regions.international_by_alpha3(field(text, 0..3))
    } else {
        ctx.regions.international_by_numeric(field(text, 3..6))
    }
}

fn birth_date(text: &str) -> &str {
    if is_legacy(text) {
        field(text, 7..13)
    } else {
        field(text, 6..14)
    }
}

pub fn check_format(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_format(text, &LENGTHS, &GRAMMAR)
}

pub fn check_nationality(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    if nationality(ctx, text).is_some() {
        return Ok(());
    }
    let code = if is_legacy(text) {
        field(text, 0..3)
    } else {
        field(text, 3..6)
    };
    Err(CredentialError::new(
        ErrorKind::Region,
        code,
        format!("nationality code {code} is unknown"),
    ))
}

pub fn check_region(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_domestic(ctx, &region_code(text))
}

pub fn check_birth_date(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    let date = birth_date(text);
    if !is_legacy(text) {
        return require_past_birth_date(ctx, date);
    }
    match resolve_short_date(date, ctx.today, true) {
        Some(_) => Ok(()),
        None => Err(CredentialError::new(
            ErrorKind::BirthDate,
            date,
            format!("birth date {date} is not a past date in either century"),
        )),
    }
}

pub fn check_digit(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    if is_legacy(text) {
        let body = field(text, 0..14);
        require_check_char(body, mrz_check_digit(body), char_at(text, 14))
    } else {
        let body = field(text, 0..17);
        require_check_char(body, resident_id_check_digit(body), char_at(text, 17))
    }
}

pub fn extract_nationality(
    ctx: &EvalContext<'_>,
    text: &str,
    info: &mut ForeignPermanentResidenceInfo,
) {
    info.nationality = nationality(ctx, text).cloned().unwrap_or_default();
}

pub fn extract_region(ctx: &EvalContext<'_>, text: &str, info: &mut ForeignPermanentResidenceInfo) {
    info.region = domestic_region(ctx, &region_code(text));
}

/// Kept as printed; the 15-character card's century is not resolved.
pub fn extract_birth_date(
    _: &EvalContext<'_>,
    text: &str,
    info: &mut ForeignPermanentResidenceInfo,
) {
    info.birth_date = birth_date(text).to_owned();
}

pub fn extract_gender(_: &EvalContext<'_>, text: &str, info: &mut ForeignPermanentResidenceInfo) {
    let index = if is_legacy(text) { 13 } else { 16 };
    info.gender = parity_gender(text, index);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::enums::Gender;
    use crate::processors::test_support::{ctx, rejection};

    #[test]
    fn accepts_both_card_generations() {
        let p = processor();
        assert_eq!(rejection(&p, "KAZ110090123105"), None);
        assert_eq!(rejection(&p, "kaz110090123105"), None);
        assert_eq!(rejection(&p, "911398199012310021"), None);
    }

    #[test]
    fn rejects_malformed_input() {
        let p = processor();
        assert_eq!(rejection(&p, "KA2110090123105"), Some(ErrorKind::BasicFormat));
        assert_eq!(rejection(&p, "811398199012310021"), Some(ErrorKind::BasicFormat));
        assert_eq!(rejection(&p, "KAZ1100901231051"), Some(ErrorKind::BasicFormat));
    }

    #[test]
    fn rejects_unknown_nationality_or_region() {
        let p = processor();
        assert_eq!(rejection(&p, "KAA110090123105"), Some(ErrorKind::Region));
        assert_eq!(rejection(&p, "KAZ990090123105"), Some(ErrorKind::Region));
        assert_eq!(rejection(&p, "999398199012310021"), Some(ErrorKind::Region));
        assert_eq!(rejection(&p, "911999199012310021"), Some(ErrorKind::Region));
    }

    #[test]
    fn rejects_impossible_birth_date() {
        let p = processor();
        assert_eq!(rejection(&p, "KAZ110090023105"), Some(ErrorKind::BirthDate));
        assert_eq!(rejection(&p, "911398199002310021"), Some(ErrorKind::BirthDate));
    }

    #[test]
    fn rejects_wrong_check_character() {
        let p = processor();
        assert_eq!(rejection(&p, "KAZ110090123107"), Some(ErrorKind::CheckDigit));
        assert_eq!(rejection(&p, "911398199012310022"), Some(ErrorKind::CheckDigit));
        assert_eq!(rejection(&p, "911398199012310020"), Some(ErrorKind::CheckDigit));
    }

    #[test]
    fn decodes_fifteen_character_card() {
        let info = processor()
            .decode(&ctx(), "KAZ110090123105")
            .expect("valid card");
        assert_eq!(info.nationality.alpha3.as_deref(), Some("KAZ"));
        assert_eq!(info.nationality.zh_name(), Some("哈萨克斯坦"));
        assert_eq!(info.region.code, "110000");
        assert_eq!(info.region.province.as_deref(), Some("北京市"));
        assert_eq!(info.region.city, None);
        assert_eq!(info.region.county, None);
        assert_eq!(info.birth_date, "901231");
        assert_eq!(info.gender, Gender::Female);
    }

    #[test]
    fn decodes_eighteen_character_card() {
        let info = processor()
            .decode(&ctx(), "911398199012310021")
            .expect("valid card");
        assert_eq!(info.nationality.numeric.as_deref(), Some("398"));
        assert_eq!(info.region.code, "110000");
        assert_eq!(info.birth_date, "19901231");
        assert_eq!(info.gender, Gender::Female);
    }
}
