//! Three-letter codes that may appear in a passport machine readable zone
//! but are not ISO 3166 alpha-3 country codes (ICAO Doc 9303 Part 3 §5).
use std::sync::LazyLock;

use super::InternationalRegion;

/// `(alpha3, alpha2, numeric, zh_short, en_short, zh_full, en_full)`
type Row = (
    &'static str,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
    &'static str,
    &'static str,
);

const ROWS: &[Row] = &[
    ("GBD", None, None, Some("英国海外领土公民"), None, "英国海外领土公民", "British Overseas Territories Citizen"),
    ("GBN", None, None, None, None, "英国国民（海外）", "British National(Overseas)"),
    ("GBO", None, None, None, None, "英国海外公民", "British Overseas Citizen"),
    ("GBS", None, None, None, None, "英籍人士", "British Subject"),
    ("GBP", None, None, None, None, "受英国保护人士", "British Protected Person"),
    ("D<<", Some("DE"), Some("276"), Some("德国"), Some("GERMANY"), "德意志联邦共和国", "the Federal Republic of Germany"),
    ("RKS", Some("KS"), None, Some("科索沃"), Some("KOSOVO"), "科索沃共和国", "the Republic of Kosovo"),
    ("EUE", Some("EU"), None, None, None, "欧盟", "European Union(EU)"),
    ("UNO", Some("UN"), None, None, None, "联合国组织或者该组织的一名官员", "United Nations Organization or one of its officials"),
    ("UNA", Some("UN"), None, None, None, "联合国专门机构或者该机构的一名官员", "United Nations specialized agency or one of its officials"),
    ("UNK", None, None, None, None, "持有联合国驻科索沃临时管理特派团（UNMIK）签发的旅行证件的科索沃居民", "Resident of Kosovo to whom a travel document has been issued by the United Nations Interim Administration Mission in Kosovo(UNMIK)"),
    ("XBA", None, None, None, None, "非洲开发银行（ADB）", "African Development Bank (ADB)"),
    ("XIM", None, None, None, None, "非洲进出口银行（AFREXIM）", "African Export-Import Bank (AFREXIM bank)"),
    ("XCC", None, None, None, None, "加勒比共同体或其一名使者（CARICOM）", "Caribbean Community or one of its emissaries (CARICOM)"),
    ("XCE", None, None, None, None, "欧洲理事会", "Council of Europe"),
    ("XCO", None, None, None, None, "东部和南部非洲共同市场（COMESA）", "Common Market for Eastern and Southern Africa (COMESA)"),
    ("XEC", None, None, None, None, "西非国家经济共同体（ECOWAS）", "Economic Community of West African States (ECOWAS)"),
    ("XPO", None, None, None, None, "国际刑事警察组织（INTERPOL）", "International Criminal Police Organization (INTERPOL)"),
    ("XES", None, None, None, None, "东加勒比国家组织（OECS）", "Organization of Eastern Caribbean States (OECS)"),
    ("XMP", None, None, None, None, "地中海议会大会（PAM）", "Parliamentary Assembly of the Mediterranean (PAM)"),
    ("XOM", None, None, None, None, "马耳他最高军教团或其一名使者", "Sovereign Military Order of Malta or one of its emissaries"),
    ("XDC", None, None, None, None, "南部非洲发展共同体", "Southern African Development Community"),
    ("XXA", None, None, None, None, "1954年《无国籍人地位公约》第1条定义的无国籍人", "Stateless person, as defined in Article 1 of the 1954 Convention Relating to the Status of Stateless Persons"),
    ("XXB", None, None, None, None, "经1967年议定书修订的1951年《难民地位公约》第1条定义的难民", "Refugee, as defined in Article 1 of the 1951 Convention Relating to the Status of Refugees as amended by the 1967 Protocol"),
    ("XXC", None, None, None, None, "不在上述XXB代码定义之内的难民", "Refugee, other than as defined under the code XXB above"),
    ("XXX", None, None, None, None, "未确定国籍的人，签发国认为不管该人的地位是什么，没有必要为其确定上述任何XXA、XXB或XXC代码。该类可以包括既不是无国籍人，也不是难民，而是在签发国合法居住的不明国籍的人", "Person of unspecified nationality, for whom issuing State does not consider it necessary to specify any of the codes XXA, XXB or XXC above, whatever that person’s status may be. This category may include a person who is neither stateless nor a refugee but who is of unknown nationality and legally residing in the State of issue"),
];

static PASSPORT_CODES: LazyLock<Vec<InternationalRegion>> = LazyLock::new(|| {
    ROWS.iter()
        .map(
            |&(alpha3, alpha2, numeric, zh_short, en_short, zh_full, en_full)| {
                InternationalRegion {
                    zh_short_name: zh_short.map(str::to_owned),
                    en_short_name: en_short.map(str::to_owned),
                    zh_full_name: Some(zh_full.to_owned()),
                    en_full_name: Some(en_full.to_owned()),
                    alpha3: Some(alpha3.to_owned()),
                    alpha2: alpha2.map(str::to_owned),
                    numeric: numeric.map(str::to_owned),
                }
            },
        )
        .collect()
});

/// Looks up a non-ISO machine readable zone code such as `GBN`, `UNO`,
/// `XXA` or the single-letter German code written `D<<`.
pub fn passport_code(code: &str) -> Option<&'static InternationalRegion> {
    PASSPORT_CODES
        .iter()
        .find(|region| region.alpha3.as_deref() == Some(code))
}
