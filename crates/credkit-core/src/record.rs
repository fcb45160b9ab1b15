//! Structured fields decoded from a valid credential.
//!
//! Each built-in kind has its own info struct, filled field by field by the
//! kind's extractors starting from `Default`. [`ParsedRecord`] is the
//! kind-erased form returned by the façade.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{CredentialKind, Gender, OrgCategory};
use crate::region::{DomesticRegion, InternationalRegion};

/// Sentinel for a travel permit printed without a replacement count.
pub const NO_REPLACEMENT_COUNT: i32 = -1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentIdInfo {
    pub region: DomesticRegion,
    /// `YYYYMMDD`; the 15-digit form is widened with a `19` century.
    pub birth_date: String,
    pub gender: Gender,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HkMoTravelPermitInfo {
    /// Code `H` or `M` with the matching province name.
    pub region: DomesticRegion,
    /// Times the permit was replaced, or [`NO_REPLACEMENT_COUNT`].
    pub replacement_count: i32,
}

impl Default for HkMoTravelPermitInfo {
    fn default() -> Self {
        Self {
            region: DomesticRegion::default(),
            replacement_count: NO_REPLACEMENT_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwTravelPermitInfo {
    pub replacement_count: i32,
}

impl Default for TwTravelPermitInfo {
    fn default() -> Self {
        Self {
            replacement_count: NO_REPLACEMENT_COUNT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidencePermitInfo {
    pub region: DomesticRegion,
    pub birth_date: String,
    pub gender: Gender,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignPermanentResidenceInfo {
    pub nationality: InternationalRegion,
    pub region: DomesticRegion,
    /// As printed: six digits on the 15-character card, eight on the
    /// 18-character card.
    pub birth_date: String,
    pub gender: Gender,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportMrzInfo {
    pub document_type: String,
    pub issuing_region: InternationalRegion,
    pub surname: String,
    pub given_name: Option<String>,
    pub passport_number: String,
    pub nationality: InternationalRegion,
    /// `YYMMDD`, century not resolved.
    pub birth_date: String,
    pub gender: Gender,
    /// `YYMMDD`, century not resolved.
    pub expiration_date: String,
    pub personal_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialCreditCodeInfo {
    pub org_category: OrgCategory,
    pub region: DomesticRegion,
    /// Nine characters including the organization code check character.
    pub organization_code: String,
}

impl Default for SocialCreditCodeInfo {
    fn default() -> Self {
        Self {
            org_category: OrgCategory::OtherOther,
            region: DomesticRegion::default(),
            organization_code: String::new(),
        }
    }
}

/// A decoded credential of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedRecord {
    MainlandResidentId(ResidentIdInfo),
    HkMoTravelPermit(HkMoTravelPermitInfo),
    TwTravelPermit(TwTravelPermitInfo),
    HkMoResidencePermit(ResidencePermitInfo),
    TwResidencePermit(ResidencePermitInfo),
    ForeignPermanentResidenceId(ForeignPermanentResidenceInfo),
    PassportMrz(PassportMrzInfo),
    UnifiedSocialCreditCode(SocialCreditCodeInfo),
    /// Fields produced by a caller-registered processor.
    Custom {
        kind_code: String,
        fields: BTreeMap<String, String>,
    },
}

impl ParsedRecord {
    pub fn kind(&self) -> CredentialKind {
        match self {
            ParsedRecord::MainlandResidentId(_) => CredentialKind::MainlandResidentId,
            ParsedRecord::HkMoTravelPermit(_) => CredentialKind::HkMoTravelPermit,
            ParsedRecord::TwTravelPermit(_) => CredentialKind::TwTravelPermit,
            ParsedRecord::HkMoResidencePermit(_) => CredentialKind::HkMoResidencePermit,
            ParsedRecord::TwResidencePermit(_) => CredentialKind::TwResidencePermit,
            ParsedRecord::ForeignPermanentResidenceId(_) => {
                CredentialKind::ForeignPermanentResidenceId
            }
            ParsedRecord::PassportMrz(_) => CredentialKind::PassportMrz,
            ParsedRecord::UnifiedSocialCreditCode(_) => CredentialKind::UnifiedSocialCreditCode,
            ParsedRecord::Custom { kind_code, .. } => CredentialKind::from_code(kind_code),
        }
    }
}

macro_rules! impl_into_record {
    ($($info:ty => $variant:ident),* $(,)?) => {
        $(impl From<$info> for ParsedRecord {
            fn from(info: $info) -> Self {
                ParsedRecord::$variant(info)
            }
        })*
    };
}

impl_into_record! {
    ResidentIdInfo => MainlandResidentId,
    HkMoTravelPermitInfo => HkMoTravelPermit,
    TwTravelPermitInfo => TwTravelPermit,
    ForeignPermanentResidenceInfo => ForeignPermanentResidenceId,
    PassportMrzInfo => PassportMrz,
    SocialCreditCodeInfo => UnifiedSocialCreditCode,
}

/// Residence permits share one info struct, so each kind gets a newtype to
/// pick its record variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HkMoResidencePermit(pub ResidencePermitInfo);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwResidencePermit(pub ResidencePermitInfo);

impl From<HkMoResidencePermit> for ParsedRecord {
    fn from(permit: HkMoResidencePermit) -> Self {
        ParsedRecord::HkMoResidencePermit(permit.0)
    }
}

impl From<TwResidencePermit> for ParsedRecord {
    fn from(permit: TwResidencePermit) -> Self {
        ParsedRecord::TwResidencePermit(permit.0)
    }
}

impl fmt::Display for DomesticRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)?;
        let names: Vec<&str> = [&self.province, &self.city, &self.county]
            .into_iter()
            .filter_map(|name| name.as_deref())
            .collect();
        if !names.is_empty() {
            write!(f, " {}", names.join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Display for InternationalRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.alpha3.as_deref().unwrap_or("?");
        match (self.zh_name(), self.en_short_name.as_deref()) {
            (Some(zh), Some(en)) => write!(f, "{code} {zh} ({en})"),
            (Some(name), None) | (None, Some(name)) => write!(f, "{code} {name}"),
            (None, None) => f.write_str(code),
        }
    }
}

fn write_person(
    f: &mut fmt::Formatter<'_>,
    region: &DomesticRegion,
    birth_date: &str,
    gender: Gender,
) -> fmt::Result {
    writeln!(f, "  region:     {region}")?;
    writeln!(f, "  birth date: {birth_date}")?;
    write!(f, "  gender:     {gender}")
}

fn write_replacement(f: &mut fmt::Formatter<'_>, count: i32) -> fmt::Result {
    if count == NO_REPLACEMENT_COUNT {
        write!(f, "  replacements: not printed")
    } else {
        write!(f, "  replacements: {count}")
    }
}

impl fmt::Display for ParsedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind())?;
        match self {
            ParsedRecord::MainlandResidentId(info) => {
                write_person(f, &info.region, &info.birth_date, info.gender)
            }
            ParsedRecord::HkMoResidencePermit(info) | ParsedRecord::TwResidencePermit(info) => {
                write_person(f, &info.region, &info.birth_date, info.gender)
            }
            ParsedRecord::HkMoTravelPermit(info) => {
                writeln!(f, "  region:       {}", info.region)?;
                write_replacement(f, info.replacement_count)
            }
            ParsedRecord::TwTravelPermit(info) => write_replacement(f, info.replacement_count),
            ParsedRecord::ForeignPermanentResidenceId(info) => {
                writeln!(f, "  nationality: {}", info.nationality)?;
                writeln!(f, "  region:      {}", info.region)?;
                writeln!(f, "  birth date:  {}", info.birth_date)?;
                write!(f, "  gender:      {}", info.gender)
            }
            ParsedRecord::PassportMrz(info) => {
                writeln!(f, "  document:      {}", info.document_type)?;
                writeln!(f, "  issued by:     {}", info.issuing_region)?;
                match &info.given_name {
                    Some(given) => writeln!(f, "  name:          {}, {given}", info.surname)?,
                    None => writeln!(f, "  name:          {}", info.surname)?,
                }
                writeln!(f, "  number:        {}", info.passport_number)?;
                writeln!(f, "  nationality:   {}", info.nationality)?;
                writeln!(f, "  birth date:    {}", info.birth_date)?;
                writeln!(f, "  gender:        {}", info.gender)?;
                write!(f, "  expires:       {}", info.expiration_date)?;
                if let Some(personal) = &info.personal_number {
                    write!(f, "\n  personal no.:  {personal}")?;
                }
                Ok(())
            }
            ParsedRecord::UnifiedSocialCreditCode(info) => {
                writeln!(f, "  category:          {}", info.org_category)?;
                writeln!(f, "  region:            {}", info.region)?;
                write!(f, "  organization code: {}", info.organization_code)
            }
            ParsedRecord::Custom { fields, .. } => {
                let mut first = true;
                for (key, value) in fields {
                    if !first {
                        writeln!(f)?;
                    }
                    write!(f, "  {key}: {value}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn hangzhou() -> DomesticRegion {
        DomesticRegion {
            code: "330105".to_owned(),
            province: Some("浙江省".to_owned()),
            city: Some("杭州市".to_owned()),
            county: Some("拱墅区".to_owned()),
        }
    }

    #[test]
    fn domestic_region_display_joins_names() {
        assert_eq!(hangzhou().to_string(), "330105 浙江省 杭州市 拱墅区");
        assert_eq!(
            DomesticRegion::province("110000", "北京市").to_string(),
            "110000 北京市"
        );
        let bare = DomesticRegion {
            code: "990000".to_owned(),
            ..DomesticRegion::default()
        };
        assert_eq!(bare.to_string(), "990000");
    }

    #[test]
    fn record_json_is_tagged_by_kind() {
        let record = ParsedRecord::from(ResidentIdInfo {
            region: hangzhou(),
            birth_date: "19781027".to_owned(),
            gender: Gender::Female,
        });
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["kind"], "mainland_resident_id");
        assert_eq!(json["gender"], "FEMALE");
        assert_eq!(json["region"]["county"], "拱墅区");
        let back: ParsedRecord = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn residence_permit_newtypes_pick_their_variant() {
        let hk: ParsedRecord = HkMoResidencePermit::default().into();
        let tw: ParsedRecord = TwResidencePermit::default().into();
        assert_eq!(hk.kind(), CredentialKind::HkMoResidencePermit);
        assert_eq!(tw.kind(), CredentialKind::TwResidencePermit);
    }

    #[test]
    fn travel_permit_defaults_to_no_replacement_count() {
        assert_eq!(
            HkMoTravelPermitInfo::default().replacement_count,
            NO_REPLACEMENT_COUNT
        );
        let record = ParsedRecord::from(TwTravelPermitInfo::default());
        assert_eq!(
            record.to_string(),
            "tw-travel-permit\n  replacements: not printed"
        );
    }

    #[test]
    fn custom_record_reports_extension_kind() {
        let record = ParsedRecord::Custom {
            kind_code: "driving-licence".to_owned(),
            fields: BTreeMap::from([("class".to_owned(), "C1".to_owned())]),
        };
        assert!(!record.kind().is_built_in());
        assert_eq!(record.to_string(), "driving-licence\n  class: C1");
    }
}
