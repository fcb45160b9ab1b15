//! Passport machine readable zones in the two-line TD3 format (ICAO 9303
//! Part 4), concatenated into one 88-character string.
//!
//! ```text
//! line 1  [0..2]   document type       [2..5]   issuing state
//!         [5..44]  SURNAME<<GIVEN<NAMES, filler padded
//! line 2  [44..53] passport number     [53]     check
//!         [54..57] nationality         [57..63] birth YYMMDD   [63] check
//!         [64]     sex M/F/<           [65..71] expiry YYMMDD  [71] check
//!         [72..86] personal number     [86]     check
//!         [87]     composite check over [44..54] [57..64] [65..87]
//! ```
use std::sync::LazyLock;

use regex::Regex;

use crate::check_digits::mrz_check_digit;
use crate::dates::resolve_short_date;
use crate::enums::{CredentialKind, ErrorKind, Gender};
use crate::error::CredentialError;
use crate::pipeline::{
    Chain, EvalContext, char_at, field, grammar, require_check_char, require_format,
};
use crate::record::PassportMrzInfo;
use crate::region::{InternationalRegion, passport_code};

pub const LENGTHS: [usize; 1] = [88];

pub const FILLER: char = '<';

static GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    grammar(concat!(
        r"^P[A-Z<][A-Z<]{3}[A-Z<]{39}",
        r"[A-Z0-9<]{9}[0-9][A-Z<]{3}[0-9]{6}[0-9][MF<][0-9]{6}[0-9][A-Z0-9<]{14}[0-9<][0-9]$",
    ))
});

static NAME: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^([A-Z]+<)*[A-Z]+(<<([A-Z]+<)*[A-Z]+)?$"));

pub fn processor() -> Chain<PassportMrzInfo> {
    Chain::new(CredentialKind::PassportMrz)
        .rule(check_format)
        .rule(check_issuing_region)
        .rule(check_name)
        .rule(check_passport_number)
        .rule(check_nationality)
        .rule(check_birth_date)
        .rule(check_expiration_date)
        .rule(check_personal_number)
        .rule(check_composite)
        .extract(extract_document_type)
        .extract(extract_issuing_region)
        .extract(extract_name)
        .extract(extract_passport_number)
        .extract(extract_nationality)
        .extract(extract_birth_date)
        .extract(extract_gender)
        .extract(extract_expiration_date)
        .extract(extract_personal_number)
}

/// Resolves a three-character code against the ISO table first, then the
/// ICAO-only codes.
fn lookup_region<'a>(ctx: &EvalContext<'a>, code: &str) -> Option<&'a InternationalRegion> {
    ctx.regions
        .international_by_alpha3(code)
        .or_else(|| passport_code(code))
}

fn require_region(ctx: &EvalContext<'_>, code: &str, what: &str) -> Result<(), CredentialError> {
    match lookup_region(ctx, code) {
        Some(_) => Ok(()),
        None => Err(CredentialError::new(
            ErrorKind::Region,
            code,
            format!("{what} code {code:?} is unknown"),
        )),
    }
}

/// A field followed by its check character.
fn require_field_check(text: &str, range: std::ops::Range<usize>) -> Result<(), CredentialError> {
    let check = char_at(text, range.end);
    let payload = field(text, range);
    require_check_char(payload, mrz_check_digit(payload), check)
}

fn trim_filler(s: &str) -> &str {
    s.trim_end_matches(FILLER)
}

fn unfill(s: &str) -> String {
    s.replace(FILLER, " ")
}

pub fn check_format(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_format(text, &LENGTHS, &GRAMMAR)
}

pub fn check_issuing_region(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_region(ctx, field(text, 2..5), "issuing state")
}

pub fn check_name(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    let name = trim_filler(field(text, 5..44));
    if NAME.is_match(name) {
        Ok(())
    } else {
        Err(CredentialError::new(
            ErrorKind::Name,
            field(text, 5..44),
            format!("name {name:?} is not SURNAME<<GIVEN<NAMES"),
        ))
    }
}

pub fn check_passport_number(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_field_check(text, 44..53)
}

pub fn check_nationality(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_region(ctx, field(text, 54..57), "nationality")
}

pub fn check_birth_date(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    let date = field(text, 57..63);
    if resolve_short_date(date, ctx.today, true).is_none() {
        return Err(CredentialError::new(
            ErrorKind::BirthDate,
            date,
            format!("birth date {date} is not a past date in either century"),
        ));
    }
    require_field_check(text, 57..63)
}

pub fn check_expiration_date(ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    let date = field(text, 65..71);
    if resolve_short_date(date, ctx.today, false).is_none() {
        return Err(CredentialError::new(
            ErrorKind::ExpirationDate,
            date,
            format!("expiration date {date} is not a calendar date in either century"),
        ));
    }
    require_field_check(text, 65..71)
}

/// An absent personal number is all filler and so must carry check `0`.
pub fn check_personal_number(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_field_check(text, 72..86)
}

pub fn check_composite(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    let payload = format!(
        "{}{}{}",
        field(text, 44..54),
        field(text, 57..64),
        field(text, 65..87)
    );
    require_check_char(&payload, mrz_check_digit(&payload), char_at(text, 87))
}

pub fn extract_document_type(_: &EvalContext<'_>, text: &str, info: &mut PassportMrzInfo) {
    info.document_type = trim_filler(field(text, 0..2)).to_owned();
}

pub fn extract_issuing_region(ctx: &EvalContext<'_>, text: &str, info: &mut PassportMrzInfo) {
    info.issuing_region = lookup_region(ctx, field(text, 2..5))
        .cloned()
        .unwrap_or_default();
}

/// Splits on the first `<<`; a name without one is all surname.
pub fn extract_name(_: &EvalContext<'_>, text: &str, info: &mut PassportMrzInfo) {
    let name = trim_filler(field(text, 5..44));
    match name.split_once("<<") {
        Some((surname, given)) => {
            info.surname = unfill(surname);
            info.given_name = Some(unfill(given));
        }
        None => {
            info.surname = unfill(name);
            info.given_name = None;
        }
    }
}

pub fn extract_passport_number(_: &EvalContext<'_>, text: &str, info: &mut PassportMrzInfo) {
    info.passport_number = trim_filler(field(text, 44..53)).to_owned();
}

pub fn extract_nationality(ctx: &EvalContext<'_>, text: &str, info: &mut PassportMrzInfo) {
    info.nationality = lookup_region(ctx, field(text, 54..57))
        .cloned()
        .unwrap_or_default();
}

pub fn extract_birth_date(_: &EvalContext<'_>, text: &str, info: &mut PassportMrzInfo) {
    info.birth_date = field(text, 57..63).to_owned();
}

pub fn extract_gender(_: &EvalContext<'_>, text: &str, info: &mut PassportMrzInfo) {
    info.gender = match char_at(text, 64) {
        'M' => Gender::Male,
        'F' => Gender::Female,
        _ => Gender::Unknown,
    };
}

pub fn extract_expiration_date(_: &EvalContext<'_>, text: &str, info: &mut PassportMrzInfo) {
    info.expiration_date = field(text, 65..71).to_owned();
}

pub fn extract_personal_number(_: &EvalContext<'_>, text: &str, info: &mut PassportMrzInfo) {
    let number = trim_filler(field(text, 72..86));
    info.personal_number = (!number.is_empty()).then(|| unfill(number));
}
