//! Credential generators with valid check characters.
//!
//! Produces resident identity numbers (18 and 15 digit), HK/MO travel
//! permits, residence permits, unified social credit codes and passport
//! machine-readable zones.

use credkit_core::{
    CheckDigitError, CredentialKind, credit_code_check_digit, mrz_check_digit,
    organization_code_check_digit, resident_id_check_digit,
};
use rand::Rng;
use rand::rngs::StdRng;

/// County-level codes present in the bundled domestic table.
const COUNTY_CODES: [&str; 8] = [
    "110101", "110105", "110108", "120101", "310115", "330105", "330106", "440305",
];

/// Organization categories with a registered two-character code.
const ORG_CATEGORIES: [&str; 8] = ["11", "12", "51", "52", "53", "91", "92", "93"];

const CREDIT_ALPHABET: &[u8] = b"0123456789ABCDEFGHJKLMNPQRTUWXY";
const RESIDENT_CHECK_CHARS: &[u8] = b"0123456789X";
const DIGITS: &[u8] = b"0123456789";

const SURNAMES: [&str; 6] = ["ZHANG", "WANG", "LI", "ZHAO", "CHEN", "OUYANG"];
const GIVEN_NAMES: [&str; 6] = ["SAN", "XIAO<MING", "WEI", "FANG", "JIAN<GUO", "NA"];

/// Check character of a body drawn from the scheme's own alphabet.
///
/// `?` never passes a format rule, so a generator bug shows up as a
/// rejected sample.
fn check(result: Result<char, CheckDigitError>) -> char {
    result.unwrap_or('?')
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn chars_from(rng: &mut StdRng, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| char::from(alphabet[rng.gen_range(0..alphabet.len())]))
        .collect()
}

/// `YYYYMMDD` between 1950 and 2005; days stop at 28 so every month works.
fn birth_date(rng: &mut StdRng) -> String {
    format!(
        "{:04}{:02}{:02}",
        rng.gen_range(1950..=2005),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28)
    )
}

fn with_resident_check(body: String) -> String {
    let c = check(resident_id_check_digit(&body));
    format!("{body}{c}")
}

/// An 18-digit resident identity number.
pub fn gen_resident_id(rng: &mut StdRng) -> String {
    let region = pick(rng, &COUNTY_CODES);
    let birth = birth_date(rng);
    let seq = chars_from(rng, DIGITS, 3);
    with_resident_check(format!("{region}{birth}{seq}"))
}

/// A 15-digit resident identity number, born in the 1900s.
pub fn gen_legacy_resident_id(rng: &mut StdRng) -> String {
    let region = pick(rng, &COUNTY_CODES);
    let birth = birth_date(rng);
    let seq = chars_from(rng, DIGITS, 3);
    format!("{region}{}{seq}", &birth[2..])
}

/// An HK/MO travel permit, with a replacement count one time in four.
pub fn gen_hk_mo_travel_permit(rng: &mut StdRng) -> String {
    let region = if rng.gen_bool(0.5) { 'H' } else { 'M' };
    let number = chars_from(rng, DIGITS, 8);
    if rng.gen_bool(0.25) {
        format!("{region}{number}{:02}", rng.gen_range(0..10))
    } else {
        format!("{region}{number}")
    }
}

/// A residence permit for Hong Kong or Macao residents.
pub fn gen_hk_mo_residence_permit(rng: &mut StdRng) -> String {
    let prefix = if rng.gen_bool(0.5) { "810000" } else { "820000" };
    residence_permit(rng, prefix)
}

/// A residence permit for Taiwan residents.
pub fn gen_tw_residence_permit(rng: &mut StdRng) -> String {
    residence_permit(rng, "830000")
}

fn residence_permit(rng: &mut StdRng, prefix: &str) -> String {
    let birth = birth_date(rng);
    let seq = chars_from(rng, DIGITS, 3);
    with_resident_check(format!("{prefix}{birth}{seq}"))
}

/// A unified social credit code with both check characters in place.
pub fn gen_credit_code(rng: &mut StdRng) -> String {
    let category = pick(rng, &ORG_CATEGORIES);
    let region = pick(rng, &COUNTY_CODES);
    let org_body = chars_from(rng, CREDIT_ALPHABET, 8);
    let org_check = check(organization_code_check_digit(&org_body));
    let body = format!("{category}{region}{org_body}{org_check}");
    let c = check(credit_code_check_digit(&body));
    format!("{body}{c}")
}

fn pad(s: &str, width: usize) -> String {
    format!("{s:<<width$}")
}

fn with_mrz_check(field: &str) -> String {
    format!("{field}{}", check(mrz_check_digit(field)))
}

/// An 88-character TD3 zone issued by and for CHN.
///
/// The expiry date lies in the past half the time; only its shape is
/// checked on validation.
pub fn gen_passport_mrz(rng: &mut StdRng) -> String {
    let name = format!("{}<<{}", pick(rng, &SURNAMES), pick(rng, &GIVEN_NAMES));
    let number = with_mrz_check(&format!("E{}", chars_from(rng, DIGITS, 8)));
    let birth = with_mrz_check(&birth_date(rng)[2..]);
    let sex = if rng.gen_bool(0.5) { 'M' } else { 'F' };
    let expiry = with_mrz_check(&format!(
        "{:02}{:02}{:02}",
        rng.gen_range(15..=35),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28)
    ));
    let personal = with_mrz_check(&pad("", 14));
    let composite = check(mrz_check_digit(&format!(
        "{number}{birth}{expiry}{personal}"
    )));
    format!(
        "POCHN{}{number}CHN{birth}{sex}{expiry}{personal}{composite}",
        pad(&name, 39)
    )
}

/// Replaces the final check character with another one the format rule
/// still accepts, so only the check-character rule can reject the result.
pub fn corrupt_check_char(rng: &mut StdRng, kind: &CredentialKind, value: &str) -> String {
    let alphabet = match kind {
        CredentialKind::UnifiedSocialCreditCode => CREDIT_ALPHABET,
        CredentialKind::PassportMrz => DIGITS,
        CredentialKind::MainlandResidentId
        | CredentialKind::HkMoTravelPermit
        | CredentialKind::TwTravelPermit
        | CredentialKind::HkMoResidencePermit
        | CredentialKind::TwResidencePermit
        | CredentialKind::ForeignPermanentResidenceId
        | CredentialKind::Extension(_) => RESIDENT_CHECK_CHARS,
    };
    let Some(last) = value.chars().last() else {
        return value.to_owned();
    };
    let mut replacement = last;
    while replacement == last {
        replacement = char::from(alphabet[rng.gen_range(0..alphabet.len())]);
    }
    let mut out = value[..value.len() - last.len_utf8()].to_owned();
    out.push(replacement);
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use rand::SeedableRng;

    #[test]
    fn shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(gen_resident_id(&mut rng).len(), 18);
        assert_eq!(gen_legacy_resident_id(&mut rng).len(), 15);
        assert!(gen_hk_mo_residence_permit(&mut rng).starts_with("8"));
        assert!(gen_tw_residence_permit(&mut rng).starts_with("830000"));
        assert_eq!(gen_credit_code(&mut rng).len(), 18);
        assert_eq!(gen_passport_mrz(&mut rng).len(), 88);
        let permit = gen_hk_mo_travel_permit(&mut rng);
        assert!(permit.len() == 9 || permit.len() == 11, "{permit}");
    }

    #[test]
    fn pad_fills_with_filler() {
        assert_eq!(pad("AB", 5), "AB<<<");
        assert_eq!(pad("", 3), "<<<");
    }

    #[test]
    fn corruption_changes_only_the_last_character() {
        let mut rng = StdRng::seed_from_u64(1);
        let value = "330105197810270025";
        let bad = corrupt_check_char(&mut rng, &CredentialKind::MainlandResidentId, value);
        assert_eq!(bad.len(), value.len());
        assert_eq!(&bad[..17], &value[..17]);
        assert_ne!(bad, value);
    }
}
