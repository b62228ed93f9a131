use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::types::coercion::{decimal_from_f64, parse_amount, parse_date, parse_time, serial_to_date, time_from_day_fraction};
use crate::types::CoercionError;
use crate::types::TIMESTAMP_FORMAT;

/// A single spreadsheet cell, tagged once when the workbook is loaded.
///
/// Every coercion downstream switches on this tag instead of probing the
/// underlying workbook value again.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime)
}

impl Cell {
    pub fn text<S: Into<String>>(value: S) -> Self {
        Cell::Text(value.into())
    }

    /// True for empty cells and for text cells holding only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Number(_) | Cell::Date(_) => false
        }
    }

    /// Display form used for keyword matching and free-text fields.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.trim().to_string(),
            Cell::Number(number) if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 => {
                format!("{}", *number as i64)
            }
            Cell::Number(number) => number.to_string(),
            Cell::Date(timestamp) => timestamp.format(TIMESTAMP_FORMAT).to_string()
        }
    }

    /// Coerces the cell to a decimal amount. Blank cells are zero.
    pub fn amount(&self) -> Result<Decimal, CoercionError> {
        match self {
            Cell::Empty => Ok(Decimal::ZERO),
            Cell::Number(number) => decimal_from_f64(*number),
            Cell::Text(text) => parse_amount(text),
            Cell::Date(timestamp) => Err(CoercionError::InvalidAmount(timestamp.to_string()))
        }
    }

    pub fn is_nonzero(&self) -> bool {
        self.amount().map(|amount| !amount.is_zero()).unwrap_or(false)
    }

    /// Coerces the cell to a calendar day.
    pub fn date(&self) -> Result<NaiveDate, CoercionError> {
        match self {
            Cell::Empty => Err(CoercionError::MissingValue),
            Cell::Date(timestamp) => Ok(timestamp.date()),
            Cell::Number(serial) => serial_to_date(*serial),
            Cell::Text(text) => parse_date(text)
        }
    }

    /// Coerces the cell to a time of day, falling back to midnight.
    pub fn time(&self) -> NaiveTime {
        match self {
            Cell::Empty => NaiveTime::MIN,
            Cell::Date(timestamp) => timestamp.time(),
            Cell::Number(fraction) => time_from_day_fraction(*fraction),
            Cell::Text(text) => parse_time(text).unwrap_or(NaiveTime::MIN)
        }
    }
}
