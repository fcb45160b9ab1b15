//! Mainland travel permits for Taiwan residents: eight digits, optionally
//! followed by a two-digit replacement count.
use std::sync::LazyLock;

use regex::Regex;

use crate::enums::CredentialKind;
use crate::error::CredentialError;
use crate::pipeline::{Chain, EvalContext, grammar, require_format};
use crate::record::TwTravelPermitInfo;

use super::hk_mo_travel_permit::replacement_count;

pub const LENGTHS: [usize; 2] = [8, 10];

static GRAMMAR: LazyLock<Regex> = LazyLock::new(|| grammar(r"^(\d{8}|\d{10})$"));

pub fn processor() -> Chain<TwTravelPermitInfo> {
    Chain::new(CredentialKind::TwTravelPermit)
        .rule(check_format)
        .extract(extract_replacement_count)
}

pub fn check_format(_: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
    require_format(text, &LENGTHS, &GRAMMAR)
}

pub fn extract_replacement_count(_: &EvalContext<'_>, text: &str, info: &mut TwTravelPermitInfo) {
    info.replacement_count = replacement_count(text, 8..10);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::enums::ErrorKind;
    use crate::processors::test_support::{ctx, rejection};
    use crate::record::NO_REPLACEMENT_COUNT;

    #[test]
    fn accepts_both_lengths() {
        let p = processor();
        assert_eq!(rejection(&p, "12345678"), None);
        assert_eq!(rejection(&p, " 1234567890 "), None);
    }

    #[test]
    fn rejects_nine_digits() {
        assert_eq!(
            rejection(&processor(), "123456789"),
            Some(ErrorKind::BasicFormat)
        );
        assert_eq!(
            rejection(&processor(), "1234567A"),
            Some(ErrorKind::BasicFormat)
        );
    }

    #[test]
    fn replacement_count_only_on_long_form() {
        let short = processor().decode(&ctx(), "12345678").expect("valid");
        assert_eq!(short.replacement_count, NO_REPLACEMENT_COUNT);
        let long = processor().decode(&ctx(), "1234567890").expect("valid");
        assert_eq!(long.replacement_count, 90);
    }
}
