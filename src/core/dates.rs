//! Date normalization
//!
//! Stores hand out dates in several encodings: Grist returns float epoch
//! seconds, the relational table returns `DATE` columns, and hand-typed cells
//! use ISO or French day-first notation. Everything is reduced to a calendar
//! date here. Inputs that match no known encoding are passed through as text.

use crate::domain::{NormalizedDate, RawValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const ISO_DATE: &str = "%Y-%m-%d";
const FRENCH_DATE: &str = "%d/%m/%Y";
const ISO_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S";
const ISO_DATE_TIME_NO_SECONDS: &str = "%Y-%m-%dT%H:%M";

/// Normalizes a raw store value into a calendar date
///
/// Tried in order, first success wins:
/// 1. numeric epoch seconds (integer, float, or numeric text)
/// 2. ISO date-time containing `T`, with optional offset and fractional seconds
/// 3. `YYYY-MM-DD`
/// 4. `DD/MM/YYYY`
/// 5. `YYYY-MM-DDTHH:MM:SS`
///
/// Null, empty, `"None"` and `"null"` yield `None`. Anything else that does not
/// parse is returned as [`NormalizedDate::Unparsed`].
///
/// # Examples
///
/// ```
/// use dossier_prefill::core::dates::normalize_date;
/// use dossier_prefill::domain::{NormalizedDate, RawValue};
///
/// let date = normalize_date(&RawValue::from("21/01/2025")).unwrap();
/// assert_eq!(date.to_string(), "2025-01-21");
///
/// let passthrough = normalize_date(&RawValue::from("not-a-date")).unwrap();
/// assert_eq!(passthrough, NormalizedDate::Unparsed("not-a-date".to_string()));
/// ```
pub fn normalize_date(value: &RawValue) -> Option<NormalizedDate> {
    match value {
        RawValue::Null => None,
        RawValue::Bool(_) => value.as_text().map(NormalizedDate::Unparsed),
        RawValue::Int(0) => None,
        RawValue::Int(secs) => Some(from_epoch(*secs as f64, value)),
        RawValue::Float(secs) if *secs == 0.0 => None,
        RawValue::Float(secs) => Some(from_epoch(*secs, value)),
        RawValue::Text(text) => normalize_date_str(text),
    }
}

/// Normalizes a textual date, see [`normalize_date`]
pub fn normalize_date_str(text: &str) -> Option<NormalizedDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "None" || trimmed == "null" {
        return None;
    }

    if is_numeric_text(trimmed) {
        if let Ok(secs) = trimmed.parse::<f64>() {
            if let Some(date) = epoch_to_date(secs) {
                return Some(NormalizedDate::Date(date));
            }
        }
    }

    let parsed = parse_iso_date_time(trimmed)
        .or_else(|| NaiveDate::parse_from_str(trimmed, ISO_DATE).ok())
        .or_else(|| NaiveDate::parse_from_str(trimmed, FRENCH_DATE).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, ISO_DATE_TIME)
                .ok()
                .map(|dt| dt.date())
        });

    match parsed {
        Some(date) => Some(NormalizedDate::Date(date)),
        None => {
            tracing::debug!(value = %text, "Unrecognized date format, passing through");
            Some(NormalizedDate::Unparsed(text.to_string()))
        }
    }
}

fn from_epoch(secs: f64, original: &RawValue) -> NormalizedDate {
    match epoch_to_date(secs) {
        Some(date) => NormalizedDate::Date(date),
        None => NormalizedDate::Unparsed(original.as_text().unwrap_or_default()),
    }
}

/// Converts epoch seconds to a UTC calendar date
fn epoch_to_date(secs: f64) -> Option<NaiveDate> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp(secs.trunc() as i64, 0).map(|dt| dt.date_naive())
}

/// Digits with at most one decimal point
fn is_numeric_text(text: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for c in text.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Parses an ISO date-time with an embedded `T`, keeping the date only
///
/// The UTC offset (`Z`, `+01:00`, `-0500`) and fractional seconds are removed
/// before parsing the local date-and-time prefix. If the time part is not
/// usable the date before `T` is still accepted.
fn parse_iso_date_time(text: &str) -> Option<NaiveDate> {
    let t_pos = text.find('T')?;
    let (date_part, time_part) = (&text[..t_pos], &text[t_pos + 1..]);

    let time_end = time_part
        .find(|c: char| c == 'Z' || c == '+' || c == '-')
        .unwrap_or(time_part.len());
    let time = &time_part[..time_end];
    let time = time.split('.').next().unwrap_or(time);

    let local = format!("{date_part}T{time}");
    NaiveDateTime::parse_from_str(&local, ISO_DATE_TIME)
        .or_else(|_| NaiveDateTime::parse_from_str(&local, ISO_DATE_TIME_NO_SECONDS))
        .map(|dt| dt.date())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(date_part, ISO_DATE).ok())
}
