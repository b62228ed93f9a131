use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::types::CoercionError;
use crate::types::{DATE_FORMAT, TIMESTAMP_FORMAT};

const SECONDS_PER_DAY: f64 = 86_400.0;
//NOTE: Serial 2_958_466 is 10000-01-01, past the last day a spreadsheet can display
const LAST_SERIAL_DAY: f64 = 2_958_466.0;
//NOTE: Serial 60 is the 1900-02-29 that never existed, kept by spreadsheets for Lotus compatibility
const PHANTOM_LEAP_DAY: i64 = 60;

static ISIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2}[A-Z0-9]{10}\b").expect("valid isin regex"));

/// Parses a locale formatted amount such as `1 234,56`, `1234.56` or `1.234,56`.
///
/// Blank input, `NaN` and a lone dash are zero. Any other unparseable text is an error
/// so the caller can decide whether to default it and report that it did.
pub fn parse_amount(value: &str) -> Result<Decimal, CoercionError> {
    let value = value.trim();

    if value.is_empty() || value == "-" || value.eq_ignore_ascii_case("nan") {
        return Ok(Decimal::ZERO);
    }

    let mut cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();

    match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => {
            cleaned = cleaned.replace('.', "").replace(',', ".");
        }
        (Some(_), Some(_)) => {
            cleaned = cleaned.replace(',', "");
        }
        (Some(_), None) => {
            cleaned = cleaned.replace(',', ".");
        }
        _ => {}
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| CoercionError::InvalidAmount(value.to_string()))
}

pub(crate) fn decimal_from_f64(value: f64) -> Result<Decimal, CoercionError> {
    if !value.is_finite() {
        return Ok(Decimal::ZERO);
    }

    //NOTE: Going through the shortest round-trip text keeps 0.1 as 0.1 instead of its binary expansion
    let text = value.to_string();
    Decimal::from_str(&text).map_err(|_| CoercionError::InvalidAmount(text))
}

/// Parses a calendar day from `DD.MM.YYYY`, `DD.MM.YY`, `YYYY-MM-DD` or a full
/// `YYYY-MM-DD HH:MM:SS` timestamp. Anything after the first whitespace is ignored.
pub fn parse_date(value: &str) -> Result<NaiveDate, CoercionError> {
    let token = value.split_whitespace().next().ok_or(CoercionError::MissingValue)?;

    if let Ok(date) = NaiveDate::parse_from_str(token, DATE_FORMAT) {
        return Ok(date);
    }

    parse_day_month_year(token).ok_or_else(|| CoercionError::InvalidDate(value.trim().to_string()))
}

fn parse_day_month_year(token: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = token.split('.').collect();

    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    if ![day, month, year].iter().all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = match year.len() {
        4 => year.parse().ok()?,
        2 => {
            let short: i32 = year.parse().ok()?;
            if short < 69 { 2000 + short } else { 1900 + short }
        }
        _ => return None
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Converts a spreadsheet serial day number (1900 date system) to a calendar day.
/// The fractional part, if any, is discarded.
pub fn serial_to_date(serial: f64) -> Result<NaiveDate, CoercionError> {
    if !serial.is_finite() || !(1.0..LAST_SERIAL_DAY).contains(&serial) {
        return Err(CoercionError::SerialOutOfRange(serial));
    }

    let days = serial.floor() as i64;

    if days == PHANTOM_LEAP_DAY {
        return Err(CoercionError::SerialOutOfRange(serial));
    }

    let epoch = if days < PHANTOM_LEAP_DAY {
        NaiveDate::from_ymd_opt(1899, 12, 31)
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)
    };

    epoch
        .and_then(|epoch| epoch.checked_add_days(Days::new(days as u64)))
        .ok_or(CoercionError::SerialOutOfRange(serial))
}

/// Converts a serial date-time (day number plus fraction of a day) to a timestamp.
pub fn serial_to_timestamp(serial: f64) -> Result<NaiveDateTime, CoercionError> {
    Ok(serial_to_date(serial)?.and_time(time_from_day_fraction(serial)))
}

/// Parses `HH:MM:SS` or `HH:MM`; a full timestamp contributes its time part.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();

    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok().map(|timestamp| timestamp.time()))
}

pub(crate) fn time_from_day_fraction(value: f64) -> NaiveTime {
    if !value.is_finite() {
        return NaiveTime::MIN;
    }

    let seconds = (value.rem_euclid(1.0) * SECONDS_PER_DAY).round() as u32 % SECONDS_PER_DAY as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or(NaiveTime::MIN)
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Finds the first ISIN-shaped token in free text, or an empty string.
pub fn extract_isin(text: &str) -> String {
    ISIN_RE.find(text).map(|found| found.as_str().to_string()).unwrap_or_default()
}

/// Whole-unit quantity: the magnitude truncated toward zero.
pub fn quantity_from(amount: Decimal) -> u64 {
    amount.abs().trunc().to_u64().unwrap_or(0)
}
