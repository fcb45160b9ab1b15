//! Mainland resident identity numbers (GB 11643).
//!
//! ```text
//! 18 digits: RRRRRR YYYYMMDD SSS C    C = check character, 0-9 or X
//! 15 digits: RRRRRR YYMMDD   SSS      legacy, 19xx century, no check
//! ```
//!
//! `RRRRRR` is the domestic region of first issue; the parity of the last
//! sequence digit encodes gender.
use std::sync::LazyLock;

use regex::Regex;

use crate::check_digits::resident_id_check_digit;
use crate::enums::CredentialKind;
use crate::error::CredentialError;
use crate::pipeline::{
    Chain, EvalContext, char_at, field, grammar, require_check_char, require_format,
};
use crate::record::ResidentIdInfo;

use super::{domestic_region, parity_gender, require_domestic, require_past_birth_date};

pub const LENGTHS: [usize; 2] = [15, 18];

static GRAMMAR: LazyLock<Regex> = LazyLock::new(|| grammar(r"^(\d{17}[0-9X]|\d{15})$"));

pub fn processor() -> Chain<ResidentIdInfo> {
    Chain::new(CredentialKind::MainlandResidentId)
        .rule(check_format)
        .rule(check_region)
        .rule(check_birth_date)
        .rule(check_digit)
        .extract(extract_region)
        .extract(extract_birth_date)
        .extract(extract_gender)
}

fn is_legacy(text: &str) -> bool {
    text.len() == 15
}

/// `YYYYMMDD`, widening the legacy form with a `19` century.
fn birth_date(text: &str) -> String {
    if is_legacy(text) {
        format!("19{}", field(text, 6..12))
    } else {
        field(text, 6..14).to_owned()
    }
}

pub fn check_format(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_format(text, &LENGTHS, &GRAMMAR)
}

pub fn check_region(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_domestic(ctx, field(text, 0..6))
}

pub fn check_birth_date(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_past_birth_date(ctx, &birth_date(text))
}

/// Only the 18-digit form carries a check character.
pub fn check_digit(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    if is_legacy(text) {
        return Ok(());
    }
    let body = field(text, 0..17);
    require_check_char(body, resident_id_check_digit(body), char_at(text, 17))
}

pub fn extract_region(ctx: &EvalContext<'_>, text: &str, info: &mut ResidentIdInfo) {
    info.region = domestic_region(ctx, field(text, 0..6));
}

pub fn extract_birth_date(_: &EvalContext<'_>, text: &str, info: &mut ResidentIdInfo) {
    info.birth_date = birth_date(text);
}

pub fn extract_gender(_: &EvalContext<'_>, text: &str, info: &mut ResidentIdInfo) {
    let index = if is_legacy(text) { 14 } else { 16 };
    info.gender = parity_gender(text, index);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::enums::{ErrorKind, Gender};
    use crate::processors::test_support::{ctx, rejection};
    use proptest::prelude::*;

    #[test]
    fn accepts_both_forms() {
        let p = processor();
        assert_eq!(rejection(&p, "110101197810270029"), None);
        assert_eq!(rejection(&p, "110101781027002"), None);
        assert_eq!(rejection(&p, "330105781027002"), None);
    }

    #[test]
    fn normalizes_lowercase_check_character() {
        assert_eq!(rejection(&processor(), "  11010119781027007x "), None);
    }

    #[test]
    fn rejects_wrong_format() {
        let p = processor();
        assert_eq!(rejection(&p, "1101011978102700291"), Some(ErrorKind::BasicFormat));
        assert_eq!(rejection(&p, ""), Some(ErrorKind::BasicFormat));
        assert_eq!(rejection(&p, "11010119781027002A"), Some(ErrorKind::BasicFormat));
        assert_eq!(rejection(&p, "11010178102700X"), Some(ErrorKind::BasicFormat));
    }

    #[test]
    fn rejects_unknown_region() {
        assert_eq!(
            rejection(&processor(), "880101197810270029"),
            Some(ErrorKind::Region)
        );
    }

    #[test]
    fn rejects_impossible_birth_date() {
        let p = processor();
        assert_eq!(rejection(&p, "110101197802310029"), Some(ErrorKind::BirthDate));
        assert_eq!(rejection(&p, "110101780231002"), Some(ErrorKind::BirthDate));
    }

    /// The legacy form is never read as 20xx.
    #[test]
    fn legacy_birth_date_stays_in_nineteenth_century() {
        assert_eq!(
            rejection(&processor(), "110101000229002"),
            Some(ErrorKind::BirthDate)
        );
        let info = processor()
            .decode(&ctx(), "110101050101002")
            .expect("valid legacy id");
        assert_eq!(info.birth_date, "19050101");
    }

    #[test]
    fn rejects_future_birth_date() {
        let body = "11010120300101002";
        let check = resident_id_check_digit(body).expect("digits");
        let err = processor()
            .decode(&ctx(), &format!("{body}{check}"))
            .expect_err("born in 2030");
        assert_eq!(err.kind, ErrorKind::BirthDate);
        assert!(err.detail.contains("future"), "{}", err.detail);
    }

    #[test]
    fn rejects_wrong_check_character() {
        assert_eq!(
            rejection(&processor(), "110101197810270021"),
            Some(ErrorKind::CheckDigit)
        );
    }

    #[test]
    fn decodes_legacy_form() {
        let info = processor()
            .decode(&ctx(), "330105781027002")
            .expect("valid legacy id");
        assert_eq!(info.region.code, "330105");
        assert_eq!(info.region.province.as_deref(), Some("浙江省"));
        assert_eq!(info.region.city.as_deref(), Some("杭州市"));
        assert_eq!(info.region.county.as_deref(), Some("拱墅区"));
        assert_eq!(info.birth_date, "19781027");
        assert_eq!(info.gender, Gender::Female);
    }

    #[test]
    fn decodes_current_form() {
        let info = processor()
            .decode(&ctx(), "330105197810270025")
            .expect("valid id");
        assert_eq!(info.birth_date, "19781027");
        assert_eq!(info.gender, Gender::Female);
        let male = processor()
            .decode(&ctx(), "11010119781027007X")
            .expect("valid id with X check");
        assert_eq!(male.gender, Gender::Male);
    }

    proptest! {
        #[test]
        fn correct_check_character_validates(
            seq in "[0-9]{3}",
            year in 1950u32..2020,
            month in 1u32..=12,
            day in 1u32..=28,
        ) {
            let body = format!("330105{year:04}{month:02}{day:02}{seq}");
            let check = resident_id_check_digit(&body).expect("digits");
            prop_assert_eq!(rejection(&processor(), &format!("{body}{check}")), None);
            for other in "0123456789X".chars().filter(|&c| c != check) {
                prop_assert_eq!(
                    rejection(&processor(), &format!("{body}{other}")),
                    Some(ErrorKind::CheckDigit)
                );
            }
        }
    }
}
