//! Region reference data: domestic administrative divisions and
//! international country codes.
//!
//! Processors never read tables directly; they receive a [`RegionSource`]
//! through their evaluation context. [`RegionTables`] is the CSV-backed
//! implementation, and [`default_region_tables`] is a process-wide instance
//! built from the data files bundled with this crate on first use.
//!
//! # Domestic table
//!
//! Two columns, `code,name`, no header. The hierarchy is implied by the code:
//! `xx0000` is a province, `xxxx00` a prefecture-level city, anything else a
//! county. Rows inherit the province and city names of previously read rows
//! that share their prefix, so parents must precede children.
//!
//! # International table
//!
//! Seven columns, `zh_short,en_short,zh_full,en_full,alpha3,alpha2,numeric`,
//! no header. Empty fields are absent.
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::RegionDataError;

mod passport_codes;

pub use passport_codes::passport_code;


const BUNDLED_DOMESTIC: &str = include_str!("../../data/domestic.csv");
const BUNDLED_INTERNATIONAL: &str = include_str!("../../data/international.csv");

/// A domestic administrative division.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomesticRegion {
    pub code: String,
    pub province: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
}

impl DomesticRegion {
    /// A province-level region with no city or county.
    pub fn province(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            province: Some(name.into()),
            city: None,
            county: None,
        }
    }
}

/// A country, territory or organization known by its ISO 3166 codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternationalRegion {
    pub zh_short_name: Option<String>,
    pub en_short_name: Option<String>,
    pub zh_full_name: Option<String>,
    pub en_full_name: Option<String>,
    pub alpha3: Option<String>,
    pub alpha2: Option<String>,
    pub numeric: Option<String>,
}

impl InternationalRegion {
    /// The most specific Chinese name available.
    pub fn zh_name(&self) -> Option<&str> {
        self.zh_short_name
            .as_deref()
            .or(self.zh_full_name.as_deref())
    }
}

/// Read-only region lookups injected into rule evaluation.
///
/// Lookups are exact, case-sensitive matches on the code as it appears in
/// the credential. Implementations must be shareable across threads.
pub trait RegionSource: Send + Sync {
    /// Domestic region by six-digit code.
    fn domestic(&self, code: &str) -> Option<&DomesticRegion>;

    fn international_by_alpha2(&self, alpha2: &str) -> Option<&InternationalRegion>;

    fn international_by_alpha3(&self, alpha3: &str) -> Option<&InternationalRegion>;

    /// International region by three-digit numeric code.
    fn international_by_numeric(&self, numeric: &str) -> Option<&InternationalRegion>;
}

impl<T: RegionSource + ?Sized> RegionSource for &T {
    fn domestic(&self, code: &str) -> Option<&DomesticRegion> {
        (**self).domestic(code)
    }

    fn international_by_alpha2(&self, alpha2: &str) -> Option<&InternationalRegion> {
        (**self).international_by_alpha2(alpha2)
    }

    fn international_by_alpha3(&self, alpha3: &str) -> Option<&InternationalRegion> {
        (**self).international_by_alpha3(alpha3)
    }

    fn international_by_numeric(&self, numeric: &str) -> Option<&InternationalRegion> {
        (**self).international_by_numeric(numeric)
    }
}

/// In-memory region tables with one index per lookup key.
#[derive(Debug, Clone, Default)]
pub struct RegionTables {
    domestic: HashMap<String, DomesticRegion>,
    international: Vec<InternationalRegion>,
    by_alpha2: HashMap<String, usize>,
    by_alpha3: HashMap<String, usize>,
    by_numeric: HashMap<String, usize>,
}

impl RegionTables {
    /// Empty tables. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the two CSV tables.
    ///
    /// # Errors
    ///
    /// [`RegionDataError::Csv`] if the CSV reader fails and
    /// [`RegionDataError::Row`] for a row of the wrong shape.
    pub fn from_csv_readers<D: Read, I: Read>(
        domestic: D,
        international: I,
    ) -> Result<Self, RegionDataError> {
        let mut tables = Self::new();
        tables.load_domestic(domestic)?;
        tables.load_international(international)?;
        Ok(tables)
    }

    /// Reads both tables from files.
    ///
    /// # Errors
    ///
    /// [`RegionDataError::Io`] if a file cannot be opened, otherwise as
    /// [`RegionTables::from_csv_readers`].
    pub fn from_csv_paths(
        domestic: impl AsRef<Path>,
        international: impl AsRef<Path>,
    ) -> Result<Self, RegionDataError> {
        let open = |path: &Path| {
            File::open(path).map_err(|source| RegionDataError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        Self::from_csv_readers(open(domestic.as_ref())?, open(international.as_ref())?)
    }

    /// Parses the data files compiled into this crate.
    ///
    /// # Errors
    ///
    /// Only if the bundled files are malformed.
    pub fn bundled() -> Result<Self, RegionDataError> {
        Self::from_csv_readers(
            BUNDLED_DOMESTIC.as_bytes(),
            BUNDLED_INTERNATIONAL.as_bytes(),
        )
    }

    /// Adds or replaces a domestic entry.
    pub fn with_domestic(mut self, region: DomesticRegion) -> Self {
        self.domestic.insert(region.code.clone(), region);
        self
    }

    /// Adds an international entry, indexing whichever codes it carries.
    ///
    /// A later entry sharing a code with an earlier one wins that code.
    pub fn with_international(mut self, region: InternationalRegion) -> Self {
        self.push_international(region);
        self
    }

    pub fn domestic_len(&self) -> usize {
        self.domestic.len()
    }

    pub fn international_len(&self) -> usize {
        self.international.len()
    }

    fn load_domestic<R: Read>(&mut self, reader: R) -> Result<(), RegionDataError> {
        const TABLE: &str = "domestic";
        let mut reader = csv_reader(reader);
        for result in reader.records() {
            let record = result.map_err(|source| RegionDataError::Csv {
                table: TABLE,
                source,
            })?;
            let line = record.position().map_or(0, csv::Position::line);
            if is_blank(&record) {
                continue;
            }
            let (Some(code), Some(name)) = (record.get(0), record.get(1)) else {
                return Err(RegionDataError::Row {
                    table: TABLE,
                    line,
                    detail: format!("expected 2 fields, found {}", record.len()),
                });
            };
            if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RegionDataError::Row {
                    table: TABLE,
                    line,
                    detail: format!("region code {code:?} is not six digits"),
                });
            }
            let region = self.place_domestic(code, name);
            self.domestic.insert(code.to_owned(), region);
        }
        Ok(())
    }

    /// Builds a domestic entry, inheriting parent names by code prefix.
    fn place_domestic(&self, code: &str, name: &str) -> DomesticRegion {
        let parent = |suffix: &str, len: usize| self.domestic.get(&format!("{}{suffix}", &code[..len]));
        let province_of = || parent("0000", 2).and_then(|p| p.province.clone());
        let mut region = DomesticRegion {
            code: code.to_owned(),
            ..DomesticRegion::default()
        };
        if code.ends_with("0000") {
            region.province = Some(name.to_owned());
        } else if code.ends_with("00") {
            region.province = province_of();
            region.city = Some(name.to_owned());
        } else {
            region.province = province_of();
            region.city = parent("00", 4).and_then(|c| c.city.clone());
            region.county = Some(name.to_owned());
        }
        region
    }

    fn load_international<R: Read>(&mut self, reader: R) -> Result<(), RegionDataError> {
        const TABLE: &str = "international";
        let mut reader = csv_reader(reader);
        for result in reader.records() {
            let record = result.map_err(|source| RegionDataError::Csv {
                table: TABLE,
                source,
            })?;
            if is_blank(&record) {
                continue;
            }
            if record.len() != 7 {
                return Err(RegionDataError::Row {
                    table: TABLE,
                    line: record.position().map_or(0, csv::Position::line),
                    detail: format!("expected 7 fields, found {}", record.len()),
                });
            }
            let field = |i: usize| {
                record
                    .get(i)
                    .filter(|value| !value.is_empty())
                    .map(str::to_owned)
            };
            self.push_international(InternationalRegion {
                zh_short_name: field(0),
                en_short_name: field(1),
                zh_full_name: field(2),
                en_full_name: field(3),
                alpha3: field(4),
                alpha2: field(5),
                numeric: field(6),
            });
        }
        Ok(())
    }

    fn push_international(&mut self, region: InternationalRegion) {
        let index = self.international.len();
        for (key, map) in [
            (&region.alpha2, &mut self.by_alpha2),
            (&region.alpha3, &mut self.by_alpha3),
            (&region.numeric, &mut self.by_numeric),
        ] {
            if let Some(key) = key {
                map.insert(key.clone(), index);
            }
        }
        self.international.push(region);
    }

    fn international_at(&self, index: Option<&usize>) -> Option<&InternationalRegion> {
        index.and_then(|&i| self.international.get(i))
    }
}

impl RegionSource for RegionTables {
    fn domestic(&self, code: &str) -> Option<&DomesticRegion> {
        self.domestic.get(code)
    }

    fn international_by_alpha2(&self, alpha2: &str) -> Option<&InternationalRegion> {
        self.international_at(self.by_alpha2.get(alpha2))
    }

    fn international_by_alpha3(&self, alpha3: &str) -> Option<&InternationalRegion> {
        self.international_at(self.by_alpha3.get(alpha3))
    }

    fn international_by_numeric(&self, numeric: &str) -> Option<&InternationalRegion> {
        self.international_at(self.by_numeric.get(numeric))
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

static DEFAULT_TABLES: OnceLock<RegionTables> = OnceLock::new();

fn load_bundled() -> RegionTables {
    match RegionTables::bundled() {
        Ok(tables) => {
            tracing::info!(
                domestic = tables.domestic_len(),
                international = tables.international_len(),
                "loaded bundled region tables"
            );
            tables
        }
        Err(err) => {
            tracing::error!(error = %err, "bundled region tables are malformed; using empty tables");
            RegionTables::new()
        }
    }
}

/// The bundled region tables, parsed once per process on first use.
///
/// Threads racing on first use block until the single load finishes.
pub fn default_region_tables() -> &'static RegionTables {
    DEFAULT_TABLES.get_or_init(load_bundled)
}

/// Whether [`default_region_tables`] has parsed the bundled data yet.
pub fn default_region_tables_loaded() -> bool {
    DEFAULT_TABLES.get().is_some()
}
