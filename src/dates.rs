//! Date normalization for raw workbook cells.
//!
//! A date cell may arrive as an Excel serial number (cells read without date
//! coercion), as a string in any of the spellings the lab has used over the
//! years (`1-Jan-25` dominates), or as a native date cell. Attempts run in a
//! fixed order and the first success wins; a value that survives no attempt
//! fails normalization and the caller skips that row.

use std::sync::OnceLock;

use calamine::Data;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Day offset between the Excel 1900 epoch (1899-12-30) and 1970-01-01.
const EXCEL_EPOCH_OFFSET_DAYS: f64 = 25_569.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Two-digit years at or above this resolve to 19xx, below it to 20xx.
const CENTURY_PIVOT: u32 = 50;

const FIXED_FORMATS: &[&str] = &[
    "%d-%b-%y",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d/%m/%y",
    "%Y-%m-%d",
    "%d-%m-%Y",
];

// Long-form spellings tried last, matching the loose trailing parse of the
// upstream sheets (month names written out, ISO timestamps, slash datetimes).
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%d-%b-%Y",
    "%Y/%m/%d",
    "%d %b %Y",
    "%d %B %Y",
    "%B %d, %Y",
];
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Converts one raw cell into a canonical date, or `None` when the cell
/// cannot be read as any supported encoding.
pub fn normalize_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::Float(serial) => serial_to_date(*serial),
        Data::Int(serial) => serial_to_date(*serial as f64),
        Data::String(raw) => parse_date_text(raw),
        Data::DateTime(dt) => serial_to_date(dt.as_f64()),
        Data::DateTimeIso(raw) => parse_date_text(raw),
        Data::Bool(_) | Data::DurationIso(_) | Data::Error(_) | Data::Empty => None,
    }
}

/// Day-count serial relative to the 1899-12-30 baseline.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let seconds = (serial - EXCEL_EPOCH_OFFSET_DAYS) * SECONDS_PER_DAY;
    DateTime::from_timestamp(seconds.round() as i64, 0).map(|dt| dt.date_naive())
}

fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = parse_day_month_name(trimmed) {
        return Some(date);
    }
    if let Some(date) = parse_slash_day_first(trimmed) {
        return Some(date);
    }
    for format in FIXED_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in FALLBACK_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in FALLBACK_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// `D(D)-MMM-YY`, the dominant spelling in these sheets. The two-digit year
/// is expanded explicitly so the century pivot stays at 50 rather than
/// drifting with chrono's `%y` mapping.
fn parse_day_month_name(text: &str) -> Option<NaiveDate> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2})-([A-Za-z]{3})-(\d{2})$").expect("day-month-name pattern")
    });
    let captures = pattern.captures(text)?;
    let day: u32 = captures[1].parse().ok()?;
    let year = expand_two_digit_year(captures[3].parse().ok()?);
    let rewritten = format!("{day:02}-{month}-{year}", month = &captures[2]);
    NaiveDate::parse_from_str(&rewritten, "%d-%b-%Y").ok()
}

/// `D(D)/M(M)/YY(YY)`, day first. Invalid calendar combinations fall through
/// to the fixed format list, which retries month-first.
fn parse_slash_day_first(text: &str) -> Option<NaiveDate> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2}|\d{4})$").expect("slash date pattern")
    });
    let captures = pattern.captures(text)?;
    let day: u32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    let year_part = &captures[3];
    let year = if year_part.len() == 2 {
        expand_two_digit_year(year_part.parse().ok()?)
    } else {
        year_part.parse().ok()?
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn expand_two_digit_year(year: u32) -> i32 {
    if year >= CENTURY_PIVOT {
        1900 + year as i32
    } else {
        2000 + year as i32
    }
}
