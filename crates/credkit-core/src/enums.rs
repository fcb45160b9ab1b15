//! Closed vocabularies of the credential model.
//!
//! `CredentialKind` is open for extension through its `Extension` variant; all
//! other enums are closed and serialize to their SCREAMING_SNAKE codes.
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A family of credential numbers sharing one grammar and one set of rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CredentialKind {
    /// 18-digit (or legacy 15-digit) mainland resident identity number.
    MainlandResidentId,
    /// Mainland travel permit for Hong Kong and Macao residents.
    HkMoTravelPermit,
    /// Mainland travel permit for Taiwan residents.
    TwTravelPermit,
    /// Residence permit for Hong Kong and Macao residents.
    HkMoResidencePermit,
    /// Residence permit for Taiwan residents.
    TwResidencePermit,
    /// Foreign permanent resident identity card, 15 or 18 characters.
    ForeignPermanentResidenceId,
    /// The two 44-character lines of a passport machine readable zone.
    PassportMrz,
    /// 18-character unified social credit code of an organization.
    UnifiedSocialCreditCode,
    /// A caller-registered kind, identified by its wire code.
    Extension(String),
}

impl CredentialKind {
    /// The kinds shipped with this crate, in catalogue order.
    pub const BUILT_IN: [CredentialKind; 8] = [
        CredentialKind::MainlandResidentId,
        CredentialKind::HkMoTravelPermit,
        CredentialKind::TwTravelPermit,
        CredentialKind::HkMoResidencePermit,
        CredentialKind::TwResidencePermit,
        CredentialKind::ForeignPermanentResidenceId,
        CredentialKind::PassportMrz,
        CredentialKind::UnifiedSocialCreditCode,
    ];

    /// Returns the kebab-case wire code.
    ///
    /// For built-in kinds this is a `&'static str`; for extensions the stored
    /// code is returned by reference.
    pub fn code(&self) -> &str {
        match self {
            CredentialKind::MainlandResidentId => "mainland-resident-id",
            CredentialKind::HkMoTravelPermit => "hk-mo-travel-permit",
            CredentialKind::TwTravelPermit => "tw-travel-permit",
            CredentialKind::HkMoResidencePermit => "hk-mo-residence-permit",
            CredentialKind::TwResidencePermit => "tw-residence-permit",
            CredentialKind::ForeignPermanentResidenceId => "foreign-permanent-residence-id",
            CredentialKind::PassportMrz => "passport-mrz",
            CredentialKind::UnifiedSocialCreditCode => "unified-social-credit-code",
            CredentialKind::Extension(code) => code.as_str(),
        }
    }

    /// Official Chinese name of the credential. Extensions report their code.
    pub fn zh_name(&self) -> &str {
        match self {
            CredentialKind::MainlandResidentId => "中华人民共和国居民身份证号码",
            CredentialKind::HkMoTravelPermit => "港澳居民来往内地通行证号码",
            CredentialKind::TwTravelPermit => "台湾居民来往大陆通行证号码",
            CredentialKind::HkMoResidencePermit => "港澳居民居住证号码",
            CredentialKind::TwResidencePermit => "台湾居民居住证号码",
            CredentialKind::ForeignPermanentResidenceId => "外国人永久居留身份证号码",
            CredentialKind::PassportMrz => "可机读护照编码",
            CredentialKind::UnifiedSocialCreditCode => "统一社会信用代码",
            CredentialKind::Extension(code) => code.as_str(),
        }
    }

    /// English name of the credential. Extensions report their code.
    pub fn en_name(&self) -> &str {
        match self {
            CredentialKind::MainlandResidentId => "Chinese Resident Identity Card Number",
            CredentialKind::HkMoTravelPermit => {
                "Mainland Travel Permit for Hong Kong and Macao Residents Number"
            }
            CredentialKind::TwTravelPermit => "Mainland Travel Permit for Taiwan Residents Number",
            CredentialKind::HkMoResidencePermit => {
                "Residence Permit Number for Hong Kong and Macao Residents"
            }
            CredentialKind::TwResidencePermit => "Residence Permit Number for Taiwan Residents",
            CredentialKind::ForeignPermanentResidenceId => {
                "Foreign Permanent Resident ID Card Number"
            }
            CredentialKind::PassportMrz => "Machine Readable Passport Code",
            CredentialKind::UnifiedSocialCreditCode => "Unified Social Credit Identifier",
            CredentialKind::Extension(code) => code.as_str(),
        }
    }

    /// Resolves a wire code, case-insensitively and accepting `_` for `-`.
    ///
    /// Unrecognised codes become [`CredentialKind::Extension`]; whether such a
    /// kind is supported is decided by the registry it is looked up in.
    pub fn from_code(code: &str) -> Self {
        let folded = code.trim().to_ascii_lowercase().replace('_', "-");
        CredentialKind::BUILT_IN
            .into_iter()
            .find(|kind| kind.code() == folded)
            .unwrap_or_else(|| CredentialKind::Extension(folded))
    }

    /// Returns `true` for the eight kinds shipped with this crate.
    pub fn is_built_in(&self) -> bool {
        !matches!(self, CredentialKind::Extension(_))
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CredentialKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl Serialize for CredentialKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for CredentialKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CredentialKindVisitor;

        impl de::Visitor<'_> for CredentialKindVisitor {
            type Value = CredentialKind;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a credential kind code")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(CredentialKind::from_code(v))
            }
        }

        deserializer.deserialize_str(CredentialKindVisitor)
    }
}

/// Gender encoded in a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    /// Not encoded, or encoded as filler.
    #[default]
    Unknown,
}

impl Gender {
    /// Gender from the parity of an ASCII digit: odd is male, even is female.
    ///
    /// Returns [`Gender::Unknown`] for anything that is not a digit.
    pub fn from_parity_digit(digit: u8) -> Self {
        match digit {
            b'1' | b'3' | b'5' | b'7' | b'9' => Gender::Male,
            b'0' | b'2' | b'4' | b'6' | b'8' => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Unknown => "UNKNOWN",
        }
    }

    pub fn zh_desc(self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
            Gender::Unknown => "未知",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The authority that registered an organization, first character of a
/// unified social credit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationDepartment {
    OrgEstablishment,
    ForeignAffairs,
    JudicialAdministration,
    Culture,
    CivilAffairs,
    Tourism,
    Religion,
    LaborUnion,
    MarketRegulation,
    CentralMilitaryCommissionReformOrg,
    PublicSecurity,
    HousingUrbanRuralDevelopment,
    AgricultureRuralAffairs,
    OverseasChineseFederation,
    Other,
}

impl RegistrationDepartment {
    pub const ALL: [RegistrationDepartment; 15] = [
        RegistrationDepartment::OrgEstablishment,
        RegistrationDepartment::ForeignAffairs,
        RegistrationDepartment::JudicialAdministration,
        RegistrationDepartment::Culture,
        RegistrationDepartment::CivilAffairs,
        RegistrationDepartment::Tourism,
        RegistrationDepartment::Religion,
        RegistrationDepartment::LaborUnion,
        RegistrationDepartment::MarketRegulation,
        RegistrationDepartment::CentralMilitaryCommissionReformOrg,
        RegistrationDepartment::PublicSecurity,
        RegistrationDepartment::HousingUrbanRuralDevelopment,
        RegistrationDepartment::AgricultureRuralAffairs,
        RegistrationDepartment::OverseasChineseFederation,
        RegistrationDepartment::Other,
    ];

    /// One-character department code.
    pub fn code(self) -> &'static str {
        match self {
            RegistrationDepartment::OrgEstablishment => "1",
            RegistrationDepartment::ForeignAffairs => "2",
            RegistrationDepartment::JudicialAdministration => "3",
            RegistrationDepartment::Culture => "4",
            RegistrationDepartment::CivilAffairs => "5",
            RegistrationDepartment::Tourism => "6",
            RegistrationDepartment::Religion => "7",
            RegistrationDepartment::LaborUnion => "8",
            RegistrationDepartment::MarketRegulation => "9",
            RegistrationDepartment::CentralMilitaryCommissionReformOrg => "A",
            RegistrationDepartment::PublicSecurity => "G",
            RegistrationDepartment::HousingUrbanRuralDevelopment => "J",
            RegistrationDepartment::AgricultureRuralAffairs => "N",
            RegistrationDepartment::OverseasChineseFederation => "Q",
            RegistrationDepartment::Other => "Y",
        }
    }

    pub fn zh_desc(self) -> &'static str {
        match self {
            RegistrationDepartment::OrgEstablishment => "机构编制",
            RegistrationDepartment::ForeignAffairs => "外交",
            RegistrationDepartment::JudicialAdministration => "司法行政",
            RegistrationDepartment::Culture => "文化",
            RegistrationDepartment::CivilAffairs => "民政",
            RegistrationDepartment::Tourism => "旅游",
            RegistrationDepartment::Religion => "宗教",
            RegistrationDepartment::LaborUnion => "工会",
            RegistrationDepartment::MarketRegulation => "市场监管",
            RegistrationDepartment::CentralMilitaryCommissionReformOrg => {
                "中央军委改革和编制办公室"
            }
            RegistrationDepartment::PublicSecurity => "公安",
            RegistrationDepartment::HousingUrbanRuralDevelopment => "住房城乡建设",
            RegistrationDepartment::AgricultureRuralAffairs => "农业农村",
            RegistrationDepartment::OverseasChineseFederation => "侨联",
            RegistrationDepartment::Other => "其他",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }
}

/// Organization category, the first two characters of a unified social
/// credit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrgCategory {
    OrgEstablishmentOrgan,
    OrgEstablishmentInstitution,
    OrgEstablishmentMassOrg,
    OrgEstablishmentOther,
    ForeignAffairsNewsAgency,
    ForeignAffairsOther,
    JudicialAdministrationLawyer,
    JudicialAdministrationCommercialMediation,
    JudicialAdministrationOther,
    CultureCulturalCenter,
    CultureOther,
    CivilAffairsSocialGroup,
    CivilAffairsPrivateNonEnterprise,
    CivilAffairsFoundation,
    CivilAffairsVillageCommittee,
    CivilAffairsResidentCommittee,
    CivilAffairsOther,
    TourismForeignTourismRep,
    TourismHmtTourismRep,
    TourismOther,
    ReligionActivitySite,
    ReligionSchool,
    ReligionOther,
    LaborUnionGrassroots,
    LaborUnionInformal,
    LaborUnionOther,
    MarketRegulationEnterprise,
    MarketRegulationIndividual,
    MarketRegulationFarmersCoop,
    MarketRegulationOther,
    CentralMilitaryCommissionReformOrgCivilian,
    CentralMilitaryCommissionReformOrgOther,
    PublicSecurityForeignNgo,
    PublicSecurityOther,
    HousingUrbanRuralDevelopmentOwnerMeeting,
    HousingUrbanRuralDevelopmentOther,
    AgricultureRuralAffairsGroupEconomy,
    AgricultureRuralAffairsVillageEconomy,
    AgricultureRuralAffairsTownshipEconomy,
    AgricultureRuralAffairsOther,
    OverseasChineseFederationDistrict,
    OverseasChineseFederationTownship,
    OverseasChineseFederationVillage,
    OverseasChineseFederationOther,
    OtherOther,
}

/// One row of the organization category table.
struct OrgCategoryEntry {
    category: OrgCategory,
    department: RegistrationDepartment,
    code: &'static str,
    desc: &'static str,
}

macro_rules! org_categories {
    ($($variant:ident, $dept:ident, $code:literal, $desc:literal;)*) => {
        const ORG_CATEGORIES: &[OrgCategoryEntry] = &[
            $(OrgCategoryEntry {
                category: OrgCategory::$variant,
                department: RegistrationDepartment::$dept,
                code: $code,
                desc: $desc,
            },)*
        ];
    };
}

org_categories! {
    OrgEstablishmentOrgan, OrgEstablishment, "11", "机关";
    OrgEstablishmentInstitution, OrgEstablishment, "12", "事业单位";
    OrgEstablishmentMassOrg, OrgEstablishment, "13", "编办直接管理机构编制的群众团体";
    OrgEstablishmentOther, OrgEstablishment, "19", "其他";
    ForeignAffairsNewsAgency, ForeignAffairs, "21", "外国常驻新闻机构";
    ForeignAffairsOther, ForeignAffairs, "29", "其他";
    JudicialAdministrationLawyer, JudicialAdministration, "31", "律师执业机构";
    JudicialAdministrationCommercialMediation, JudicialAdministration, "36", "商事调节组织";
    JudicialAdministrationOther, JudicialAdministration, "39", "其他";
    CultureCulturalCenter, Culture, "41", "外国在华文化中心";
    CultureOther, Culture, "49", "其他";
    CivilAffairsSocialGroup, CivilAffairs, "51", "社会团体";
    CivilAffairsPrivateNonEnterprise, CivilAffairs, "52", "民办非企业单位";
    CivilAffairsFoundation, CivilAffairs, "53", "基金会";
    CivilAffairsVillageCommittee, CivilAffairs, "54", "村民委员会";
    CivilAffairsResidentCommittee, CivilAffairs, "55", "居民委员会";
    CivilAffairsOther, CivilAffairs, "59", "其他";
    TourismForeignTourismRep, Tourism, "61", "外国政府旅游部门常驻代表机构";
    TourismHmtTourismRep, Tourism, "62", "港澳台地区旅游部门常驻代表机构";
    TourismOther, Tourism, "69", "其他";
    ReligionActivitySite, Religion, "71", "宗教活动场所";
    ReligionSchool, Religion, "72", "宗教院校";
    ReligionOther, Religion, "79", "其他";
    LaborUnionGrassroots, LaborUnion, "81", "基层工会";
    LaborUnionInformal, LaborUnion, "82", "非法人工会组织";
    LaborUnionOther, LaborUnion, "89", "其他";
    MarketRegulationEnterprise, MarketRegulation, "91", "企业";
    MarketRegulationIndividual, MarketRegulation, "92", "个体工商户";
    MarketRegulationFarmersCoop, MarketRegulation, "93", "农民专业合作社";
    MarketRegulationOther, MarketRegulation, "99", "其他";
    CentralMilitaryCommissionReformOrgCivilian, CentralMilitaryCommissionReformOrg, "A1", "军队文职人员用人单位";
    CentralMilitaryCommissionReformOrgOther, CentralMilitaryCommissionReformOrg, "A9", "其他";
    PublicSecurityForeignNgo, PublicSecurity, "G1", "境外非政府组织代表机构";
    PublicSecurityOther, PublicSecurity, "G9", "其他";
    HousingUrbanRuralDevelopmentOwnerMeeting, HousingUrbanRuralDevelopment, "J1", "业主大会";
    HousingUrbanRuralDevelopmentOther, HousingUrbanRuralDevelopment, "J9", "其他";
    AgricultureRuralAffairsGroupEconomy, AgricultureRuralAffairs, "N1", "组级集体经济组织";
    AgricultureRuralAffairsVillageEconomy, AgricultureRuralAffairs, "N2", "村级集体经济组织";
    AgricultureRuralAffairsTownshipEconomy, AgricultureRuralAffairs, "N3", "乡镇级集体经济组织";
    AgricultureRuralAffairsOther, AgricultureRuralAffairs, "N9", "其他";
    OverseasChineseFederationDistrict, OverseasChineseFederation, "Q1", "区县级侨联组织";
    OverseasChineseFederationTownship, OverseasChineseFederation, "Q2", "乡镇级侨联组织";
    OverseasChineseFederationVillage, OverseasChineseFederation, "Q3", "村级侨联组织";
    OverseasChineseFederationOther, OverseasChineseFederation, "Q9", "其他";
    OtherOther, Other, "Y1", "其他";
}

impl OrgCategory {
    fn entry(self) -> &'static OrgCategoryEntry {
        // The table lists every variant exactly once, in declaration order.
        &ORG_CATEGORIES[self as usize]
    }

    /// Iterates every category in table order.
    pub fn all() -> impl Iterator<Item = OrgCategory> {
        ORG_CATEGORIES.iter().map(|e| e.category)
    }

    /// Looks up a category by its two-character code.
    pub fn from_code(code: &str) -> Option<Self> {
        ORG_CATEGORIES
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.category)
    }

    pub fn code(self) -> &'static str {
        self.entry().code
    }

    pub fn zh_desc(self) -> &'static str {
        self.entry().desc
    }

    pub fn department(self) -> RegistrationDepartment {
        self.entry().department
    }
}

impl fmt::Display for OrgCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}",
            self.code(),
            self.department().zh_desc(),
            self.zh_desc()
        )
    }
}

/// Why a credential was rejected. Exactly one is reported per rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Empty input, wrong length or grammar mismatch.
    #[serde(rename = "BASIC_FORMAT_ERROR")]
    BasicFormat,
    /// A region or nationality code is not in the reference tables.
    #[serde(rename = "REGION_ERROR")]
    Region,
    /// The name field of a machine readable zone is malformed.
    #[serde(rename = "NAME_ERROR")]
    Name,
    /// The birth date is not a legal date or lies in the future.
    #[serde(rename = "BIRTH_DATE_ERROR")]
    BirthDate,
    /// The expiration date is not a legal date.
    #[serde(rename = "EXPIRATION_DATE_ERROR")]
    ExpirationDate,
    /// A check character does not match, or cannot be computed.
    #[serde(rename = "CHECK_DIGIT_ERROR")]
    CheckDigit,
    /// The organization category of a credit code is unknown.
    #[serde(rename = "ORG_CATEGORY_ERROR")]
    OrgCategory,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::BasicFormat => "BASIC_FORMAT_ERROR",
            ErrorKind::Region => "REGION_ERROR",
            ErrorKind::Name => "NAME_ERROR",
            ErrorKind::BirthDate => "BIRTH_DATE_ERROR",
            ErrorKind::ExpirationDate => "EXPIRATION_DATE_ERROR",
            ErrorKind::CheckDigit => "CHECK_DIGIT_ERROR",
            ErrorKind::OrgCategory => "ORG_CATEGORY_ERROR",
        }
    }

    pub fn zh_desc(self) -> &'static str {
        match self {
            ErrorKind::BasicFormat => "基本格式错误",
            ErrorKind::Region => "地区错误",
            ErrorKind::Name => "名字错误",
            ErrorKind::BirthDate => "生日错误",
            ErrorKind::ExpirationDate => "有效期错误",
            ErrorKind::CheckDigit => "校验位错误",
            ErrorKind::OrgCategory => "机构类别错误",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn kind_codes_round_trip_through_from_code() {
        for kind in CredentialKind::BUILT_IN {
            assert_eq!(CredentialKind::from_code(kind.code()), kind);
        }
    }

    #[test]
    fn kind_from_code_folds_case_and_underscores() {
        assert_eq!(
            CredentialKind::from_code(" Passport_MRZ "),
            CredentialKind::PassportMrz
        );
        assert_eq!(
            "UNIFIED_SOCIAL_CREDIT_CODE".parse::<CredentialKind>(),
            Ok(CredentialKind::UnifiedSocialCreditCode)
        );
    }

    #[test]
    fn unknown_kind_code_is_extension() {
        let kind = CredentialKind::from_code("Driving-Licence");
        assert_eq!(kind, CredentialKind::Extension("driving-licence".to_owned()));
        assert!(!kind.is_built_in());
        assert_eq!(kind.zh_name(), "driving-licence");
    }

    #[test]
    fn kind_serializes_as_wire_code() {
        let json = serde_json::to_string(&CredentialKind::TwTravelPermit).expect("serialize");
        assert_eq!(json, "\"tw-travel-permit\"");
        let back: CredentialKind = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, CredentialKind::TwTravelPermit);
    }

    #[test]
    fn gender_from_parity() {
        assert_eq!(Gender::from_parity_digit(b'7'), Gender::Male);
        assert_eq!(Gender::from_parity_digit(b'0'), Gender::Female);
        assert_eq!(Gender::from_parity_digit(b'X'), Gender::Unknown);
    }

    #[test]
    fn org_category_table_is_in_declaration_order() {
        for (index, category) in OrgCategory::all().enumerate() {
            assert_eq!(category as usize, index, "{category:?}");
        }
    }

    #[test]
    fn org_category_code_starts_with_department_code() {
        for category in OrgCategory::all() {
            assert!(
                category.code().starts_with(category.department().code()),
                "{category:?}"
            );
        }
    }

    #[test]
    fn every_department_has_an_other_category() {
        for department in RegistrationDepartment::ALL {
            if department == RegistrationDepartment::Other {
                continue;
            }
            let other_code = format!("{}9", department.code());
            let other = OrgCategory::from_code(&other_code).expect("x9 category");
            assert_eq!(other.department(), department);
            assert_eq!(other.zh_desc(), "其他");
        }
    }

    #[test]
    fn org_category_lookup() {
        assert_eq!(
            OrgCategory::from_code("91"),
            Some(OrgCategory::MarketRegulationEnterprise)
        );
        assert_eq!(OrgCategory::from_code("88"), None);
        assert_eq!(
            RegistrationDepartment::from_code("Y"),
            Some(RegistrationDepartment::Other)
        );
    }

    #[test]
    fn error_kind_codes() {
        assert_eq!(ErrorKind::BasicFormat.code(), "BASIC_FORMAT_ERROR");
        assert_eq!(ErrorKind::OrgCategory.to_string(), "ORG_CATEGORY_ERROR");
        let json = serde_json::to_string(&ErrorKind::ExpirationDate).expect("serialize");
        assert_eq!(json, "\"EXPIRATION_DATE_ERROR\"");
    }
}
