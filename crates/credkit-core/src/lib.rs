#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod check_digits;
pub mod dates;
pub mod enums;
pub mod error;
pub mod kit;
pub mod pipeline;
pub mod processors;
pub mod record;
pub mod region;

pub use check_digits::{
    credit_code_check_digit, mrz_check_digit, organization_code_check_digit,
    resident_id_check_digit,
};
pub use enums::{CredentialKind, ErrorKind, Gender, OrgCategory, RegistrationDepartment};
pub use error::{CheckDigitError, CredentialError, RegionDataError, UnsupportedKind};
pub use kit::{CredentialKit, check, default_kit, parse, valid};
pub use pipeline::{Chain, CredentialProcessor, EvalContext, Extractor, Rule, normalize};
pub use record::{
    ForeignPermanentResidenceInfo, HkMoResidencePermit, HkMoTravelPermitInfo,
    NO_REPLACEMENT_COUNT, ParsedRecord, PassportMrzInfo, ResidencePermitInfo, ResidentIdInfo,
    SocialCreditCodeInfo, TwResidencePermit, TwTravelPermitInfo,
};
pub use region::{
    DomesticRegion, InternationalRegion, RegionSource, RegionTables, default_region_tables,
    default_region_tables_loaded, passport_code,
};
