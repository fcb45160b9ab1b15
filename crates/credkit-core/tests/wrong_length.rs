//! Length is checked before anything else, for every built-in kind.
#![allow(clippy::expect_used)]

use credkit_core::processors::{
    foreign_permanent_residence, hk_mo_residence_permit, hk_mo_travel_permit, passport_mrz,
    resident_id, social_credit_code, tw_residence_permit, tw_travel_permit,
};
use credkit_core::{CredentialKind, ErrorKind, check};
use proptest::prelude::*;

fn accepted_lengths(kind: &CredentialKind) -> &'static [usize] {
    match kind {
        CredentialKind::MainlandResidentId => &resident_id::LENGTHS,
        CredentialKind::HkMoTravelPermit => &hk_mo_travel_permit::LENGTHS,
        CredentialKind::TwTravelPermit => &tw_travel_permit::LENGTHS,
        CredentialKind::HkMoResidencePermit => &hk_mo_residence_permit::LENGTHS,
        CredentialKind::TwResidencePermit => &tw_residence_permit::LENGTHS,
        CredentialKind::ForeignPermanentResidenceId => &foreign_permanent_residence::LENGTHS,
        CredentialKind::PassportMrz => &passport_mrz::LENGTHS,
        CredentialKind::UnifiedSocialCreditCode => &social_credit_code::LENGTHS,
        CredentialKind::Extension(_) => &[],
    }
}

fn kind() -> impl Strategy<Value = CredentialKind> {
    proptest::sample::select(CredentialKind::BUILT_IN.to_vec())
}

proptest! {
    #[test]
    fn wrong_length_is_a_format_error(kind in kind(), text in "[0-9A-Z<]{0,100}") {
        prop_assume!(!accepted_lengths(&kind).contains(&text.len()));
        let err = check(&kind, &text)
            .expect("built-in kind")
            .expect_err("wrong length");
        prop_assert_eq!(err.kind, ErrorKind::BasicFormat);
    }
}
