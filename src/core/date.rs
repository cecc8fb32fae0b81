//! Calendar-date parsing for heterogeneous date cells.
//!
//! The policy is a three-way heuristic, not a format-exhaustive parser:
//! bare four-digit years map to January 1, hyphenated text is read as ISO,
//! and everything else goes through a small list of generic formats.
//! Integer cells are years, compact `YYYYMMDD` dates or epoch milliseconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::RawValue;

const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d"];
const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];
const GENERIC_DATE_FORMATS: &[&str] = &[
    "%Y%m%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Result of parsing one date cell.
///
/// Invalid cells keep their raw text so validation can report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateCell {
    Valid(NaiveDate),
    Invalid(String),
}

impl DateCell {
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Invalid(_) => None,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

#[must_use]
pub fn parse_date_cell(value: &RawValue) -> DateCell {
    match parse_calendar_date(value) {
        Some(date) => DateCell::Valid(date),
        None => DateCell::Invalid(value.to_string()),
    }
}

#[must_use]
pub fn parse_calendar_date(value: &RawValue) -> Option<NaiveDate> {
    match value {
        RawValue::Number(number) => parse_numeric_date(*number),
        RawValue::Text(text) => parse_text_date(text.trim()),
        RawValue::Bool(_) | RawValue::Null => None,
    }
}

fn parse_numeric_date(number: f64) -> Option<NaiveDate> {
    if !number.is_finite() || number.fract() != 0.0 {
        return None;
    }
    if (1000.0..=9999.0).contains(&number) {
        return NaiveDate::from_ymd_opt(number as i32, 1, 1);
    }
    // Host date cells are `YYYYMMDD` and may arrive as JSON numbers.
    if (10_000_000.0..=99_991_231.0).contains(&number) {
        if let Some(date) = compact_ymd(number as u32) {
            return Some(date);
        }
    }
    DateTime::from_timestamp_millis(number as i64).map(|time| time.date_naive())
}

fn compact_ymd(digits: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt((digits / 10_000) as i32, digits / 100 % 100, digits % 100)
}

fn parse_text_date(text: &str) -> Option<NaiveDate> {
    if is_bare_year(text) {
        let year = text.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    if text.contains('-') {
        return parse_iso_date(text);
    }
    parse_generic_date(text)
}

fn is_bare_year(text: &str) -> bool {
    text.len() == 4 && text.bytes().all(|byte| byte.is_ascii_digit())
}

fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    for format in ISO_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.date_naive());
    }
    for format in ISO_DATETIME_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(text, format) {
            return Some(time.date());
        }
    }
    // `YYYY-MM` is accepted as the first day of that month.
    NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok()
}

fn parse_generic_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    for format in GENERIC_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    DateTime::parse_from_rfc2822(text)
        .ok()
        .map(|time| time.date_naive())
}
