//! Unified social credit codes (GB 32100).
//!
//! ```text
//! D C RRRRRR OOOOOOOO K X
//! ```
//!
//! `D` registration department, `DC` organization category, `RRRRRR`
//! domestic region, `OOOOOOOO` + `K` the organization code with its own check
//! character, `X` the credit code check character.
use std::sync::LazyLock;

use regex::Regex;

use crate::check_digits::{credit_code_check_digit, organization_code_check_digit};
use crate::enums::{CredentialKind, ErrorKind, OrgCategory};
use crate::error::CredentialError;
use crate::pipeline::{
    Chain, EvalContext, char_at, field, grammar, require_check_char, require_format,
};
use crate::record::SocialCreditCodeInfo;

use super::{domestic_region, require_domestic};

pub const LENGTHS: [usize; 1] = [18];

static GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^[1-9AGJNQY][0-9]\d{6}[0-9A-Z]{8}[0-9X][0-9A-Z]$"));

pub fn processor() -> Chain<SocialCreditCodeInfo> {
    Chain::new(CredentialKind::UnifiedSocialCreditCode)
        .rule(check_format)
        .rule(check_org_category)
        .rule(check_region)
        .rule(check_organization_code)
        .rule(check_digit)
        .extract(extract_org_category)
        .extract(extract_region)
        .extract(extract_organization_code)
}

pub fn check_format(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_format(text, &LENGTHS, &GRAMMAR)
}

pub fn check_org_category(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    let code = field(text, 0..2);
    match OrgCategory::from_code(code) {
        Some(_) => Ok(()),
        None => Err(CredentialError::new(
            ErrorKind::OrgCategory,
            code,
            format!("organization category {code} is unknown"),
        )),
    }
}

pub fn check_region(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_domestic(ctx, field(text, 2..8))
}

/// The embedded nine-character organization code.
pub fn check_organization_code(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    let body = field(text, 8..16);
    require_check_char(body, organization_code_check_digit(body), char_at(text, 16))
}

pub fn check_digit(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    let body = field(text, 0..17);
    require_check_char(body, credit_code_check_digit(body), char_at(text, 17))
}

pub fn extract_org_category(_: &EvalContext<'_>, text: &str, info: &mut SocialCreditCodeInfo) {
    if let Some(category) = OrgCategory::from_code(field(text, 0..2)) {
        info.org_category = category;
    }
}

pub fn extract_region(ctx: &EvalContext<'_>, text: &str, info: &mut SocialCreditCodeInfo) {
    info.region = domestic_region(ctx, field(text, 2..8));
}

pub fn extract_organization_code(
    _: &EvalContext<'_>,
    text: &str,
    info: &mut SocialCreditCodeInfo,
) {
    info.organization_code = field(text, 8..17).to_owned();
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::enums::RegistrationDepartment;
    use crate::pipeline::CredentialProcessor;
    use crate::processors::test_support::{ctx, rejection};
    use proptest::prelude::*;

    const ALPHABET: &str = "0123456789ABCDEFGHJKLMNPQRTUWXY";

    #[test]
    fn accepts_valid_codes() {
        let p = processor();
        assert_eq!(rejection(&p, "91330106MA27Y4U47R"), None);
        assert_eq!(rejection(&p, " 91330106ma27y4u47r"), None);
        assert_eq!(rejection(&p, "11110101123456788H"), None);
    }

    #[test]
    fn rejects_malformed_codes() {
        let p = processor();
        assert_eq!(rejection(&p, "X1330106MA27Y4U47R"), Some(ErrorKind::BasicFormat));
        assert_eq!(rejection(&p, "9A330106MA27Y4U47R"), Some(ErrorKind::BasicFormat));
        assert_eq!(rejection(&p, "91330106MA27Y4U4AR"), Some(ErrorKind::BasicFormat));
        assert_eq!(rejection(&p, "91330106MA27Y4U47"), Some(ErrorKind::BasicFormat));
    }

    #[test]
    fn rejects_unknown_category() {
        assert_eq!(
            rejection(&processor(), "88330106MA27Y4U47R"),
            Some(ErrorKind::OrgCategory)
        );
    }

    /// The first two characters are shaped by the grammar and then looked up
    /// in the category table.
    #[test]
    fn category_shape_and_table() {
        let p = processor();
        assert_eq!(rejection(&p, "01330106MA27Y4U47R"), Some(ErrorKind::BasicFormat));
        assert_eq!(rejection(&p, "A5330106MA27Y4U47R"), Some(ErrorKind::OrgCategory));
        assert_eq!(rejection(&p, "18330106MA27Y4U47R"), Some(ErrorKind::OrgCategory));
        assert_eq!(rejection(&p, "A1330106MA27Y4U47Q"), None);
        let info = p.decode(&ctx(), "Y1330106MA27Y4U474").expect("valid code");
        assert_eq!(info.org_category, OrgCategory::OtherOther);
    }

    #[test]
    fn rejects_unknown_region() {
        assert_eq!(
            rejection(&processor(), "91880106MA27Y4U47R"),
            Some(ErrorKind::Region)
        );
    }

    #[test]
    fn rejects_wrong_organization_code_check() {
        assert_eq!(
            rejection(&processor(), "91330106MA27Y4U46R"),
            Some(ErrorKind::CheckDigit)
        );
    }

    #[test]
    fn rejects_wrong_credit_code_check() {
        assert_eq!(
            rejection(&processor(), "91330106MA27Y4U47Y"),
            Some(ErrorKind::CheckDigit)
        );
    }

    /// `I` passes the grammar and the organization code scheme but is not in
    /// the credit code alphabet.
    #[test]
    fn letter_outside_credit_alphabet_is_a_check_failure() {
        let err = processor()
            .validate(&ctx(), "91330106MA27Y4UI10")
            .expect_err("I is not weighable");
        assert_eq!(err.kind, ErrorKind::CheckDigit);
        assert!(err.detail.contains("cannot be computed"), "{}", err.detail);
    }

    #[test]
    fn decodes_enterprise_code() {
        let info = processor()
            .decode(&ctx(), "91330106MA27Y4U47R")
            .expect("valid code");
        assert_eq!(info.org_category, OrgCategory::MarketRegulationEnterprise);
        assert_eq!(
            info.org_category.department(),
            RegistrationDepartment::MarketRegulation
        );
        assert_eq!(info.region.code, "330106");
        assert_eq!(info.region.county.as_deref(), Some("西湖区"));
        assert_eq!(info.organization_code, "MA27Y4U47");
    }

    fn category() -> impl Strategy<Value = OrgCategory> {
        proptest::sample::select(OrgCategory::all().collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn generated_codes_validate(
            category in category(),
            org in proptest::collection::vec(proptest::sample::select(ALPHABET.as_bytes().to_vec()), 8),
        ) {
            let org = String::from_utf8(org).expect("ascii");
            let org_check = organization_code_check_digit(&org).expect("org alphabet");
            let body = format!("{}330106{org}{org_check}", category.code());
            let check = credit_code_check_digit(&body).expect("credit alphabet");
            let code = format!("{body}{check}");
            prop_assert_eq!(rejection(&processor(), &code), None);
            let info = processor().decode(&ctx(), &code).expect("valid code");
            prop_assert_eq!(info.org_category, category);
        }
    }
}
