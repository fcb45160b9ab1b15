//! Calendar checks for the compact date fields embedded in credentials.
//!
//! Credentials carry dates either as `YYYYMMDD` or as a century-less
//! `YYMMDD`. Neither form is ever interpreted relative to a time zone, so
//! everything here works on [`NaiveDate`].
use chrono::{Local, NaiveDate};

/// The current local date.
///
/// Rules never call this directly; they read the date from their evaluation
/// context so that callers (and tests) can pin the clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses exactly eight ASCII digits as `YYYYMMDD`.
///
/// Returns `None` for any other shape and for dates that do not exist on the
/// proleptic Gregorian calendar (February 29 outside leap years included).
///
/// ```
/// use credkit_core::dates::parse_compact_date;
///
/// assert!(parse_compact_date("20000229").is_some());
/// assert!(parse_compact_date("19000229").is_none());
/// ```
pub fn parse_compact_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[4..6].parse().ok()?;
    let day: u32 = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns `true` if `s` is a legal `YYYYMMDD` date.
pub fn is_calendar_date(s: &str) -> bool {
    parse_compact_date(s).is_some()
}

/// Returns `true` if `s` is a legal `YYYYMMDD` date not after `today`.
pub fn is_past_date(s: &str, today: NaiveDate) -> bool {
    parse_compact_date(s).is_some_and(|date| date <= today)
}

/// Resolves a century-less `YYMMDD` date.
///
/// Tries the 1900s first, then the 2000s, and returns the first candidate that
/// is a legal date and, when `require_past` is set, not after `today`.
pub fn resolve_short_date(yymmdd: &str, today: NaiveDate, require_past: bool) -> Option<NaiveDate> {
    if yymmdd.len() != 6 {
        return None;
    }
    ["19", "20"].into_iter().find_map(|century| {
        let date = parse_compact_date(&format!("{century}{yymmdd}"))?;
        (!require_past || date <= today).then_some(date)
    })
}
