use super::coercion::{parse_amount, parse_time, serial_to_date};
use super::{extract_isin, format_timestamp, parse_date, quantity_from, Cell, CoercionError, CurrencyTable};
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_amount_successfully_parses_locale_strings() -> Result<()> {
    let test_cases = vec![
        ("1 234,56", "1234.56"),
        ("1\u{a0}234,56", "1234.56"),
        ("1234.56", "1234.56"),
        ("1.234,56", "1234.56"),
        ("1,234.56", "1234.56"),
        ("  -15,5  ", "-15.5"),
        ("100", "100"),
        ("1e3", "1000"),
    ];

    for (input_string, expected_output) in test_cases {
        assert_eq!(parse_amount(input_string)?, Decimal::from_str(expected_output)?);
    }

    Ok(())
}

#[test]
fn test_amount_treats_blank_and_nan_as_zero() -> Result<()> {
    assert!(parse_amount("")?.is_zero());
    assert!(parse_amount("   ")?.is_zero());
    assert!(parse_amount("NaN")?.is_zero());
    assert!(parse_amount("nan")?.is_zero());
    assert!(parse_amount("-")?.is_zero());

    Ok(())
}

#[test]
fn test_amount_fails_on_garbage_but_cell_view_defaults_to_zero() {
    assert!(matches!(parse_amount("abc"), Err(CoercionError::InvalidAmount(_))));
    assert!(Cell::text("abc").amount().is_err());
    assert!(!Cell::text("abc").is_nonzero());
}

#[test]
fn test_number_cells_keep_their_decimal_value() -> Result<()> {
    assert_eq!(Cell::Number(0.1).amount()?, Decimal::from_str("0.1")?);
    assert_eq!(Cell::Number(1500.5).amount()?, Decimal::from_str("1500.50")?);
    assert!(Cell::Number(f64::NAN).amount()?.is_zero());
    assert!(Cell::Empty.amount()?.is_zero());

    Ok(())
}

#[test]
fn test_date_parses_day_month_year_variants() -> Result<()> {
    let expected = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();

    assert_eq!(parse_date("01.07.2023")?, expected);
    assert_eq!(parse_date("01.07.23")?, expected);
    assert_eq!(parse_date(" 01.07.2023 ")?, expected);
    assert_eq!(parse_date("2023-07-01")?, expected);
    assert_eq!(parse_date("2023-07-01 12:30:00")?, expected);
    assert_eq!(parse_date("01.07.69")?, NaiveDate::from_ymd_opt(1969, 7, 1).unwrap());

    Ok(())
}

#[test]
fn test_date_rejects_other_shapes() {
    assert!(parse_date("").is_err());
    assert!(parse_date("July 1st").is_err());
    assert!(parse_date("32.01.2023").is_err());
    assert!(parse_date("01.07.023").is_err());
    assert!(parse_date("01/07/2023").is_err());
    assert!(Cell::text("Итого").date().is_err());
    assert!(matches!(Cell::Empty.date(), Err(CoercionError::MissingValue)));
}

#[test]
fn test_serial_day_numbers_follow_the_1900_calendar() -> Result<()> {
    assert_eq!(serial_to_date(1.0)?, NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
    assert_eq!(serial_to_date(59.0)?, NaiveDate::from_ymd_opt(1900, 2, 28).unwrap());
    assert_eq!(serial_to_date(61.0)?, NaiveDate::from_ymd_opt(1900, 3, 1).unwrap());
    assert_eq!(serial_to_date(45108.75)?, NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());
    assert_eq!(Cell::Number(45108.0).date()?, NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());

    assert!(serial_to_date(60.0).is_err());
    assert!(serial_to_date(0.0).is_err());
    assert!(serial_to_date(-3.0).is_err());

    Ok(())
}

#[test]
fn test_time_coercion_falls_back_to_midnight() {
    assert_eq!(parse_time("10:15:30"), NaiveTime::from_hms_opt(10, 15, 30));
    assert_eq!(parse_time("10:15"), NaiveTime::from_hms_opt(10, 15, 0));
    assert_eq!(Cell::Number(0.5).time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    assert_eq!(Cell::text("soon").time(), NaiveTime::MIN);
    assert_eq!(Cell::Empty.time(), NaiveTime::MIN);
}

#[test]
fn test_timestamp_normalization_is_idempotent() -> Result<()> {
    let inputs = ["01.07.2023", "01.07.23", "2023-07-01", "2023-07-01 10:15:00"];

    for input in inputs {
        let cell = Cell::text(input);
        let once = format_timestamp(&cell.date()?.and_time(cell.time()));
        let again = Cell::text(once.as_str());
        let twice = format_timestamp(&again.date()?.and_time(again.time()));

        assert_eq!(once, twice);
        assert_eq!(once.len(), "YYYY-MM-DD HH:MM:SS".len());
    }

    assert_eq!(format_timestamp(&Cell::text("01.07.2023").date()?.and_time(NaiveTime::MIN)), "2023-07-01 00:00:00");
    assert!(Cell::text("garbage").date().is_err());
    Ok(())
}

#[test]
fn test_isin_is_extracted_from_free_text() {
    assert_eq!(extract_isin("Дивиденды по RU0009029540 за 2022 год"), "RU0009029540");
    assert_eq!(extract_isin("купон US0378331005;"), "US0378331005");
    assert_eq!(extract_isin("без идентификатора"), "");
    assert_eq!(extract_isin("XRU0009029540X"), "");
}

#[test]
fn test_cell_text_renders_integral_numbers_without_fraction() {
    assert_eq!(Cell::Number(12345.0).as_text(), "12345");
    assert_eq!(Cell::Number(1.5).as_text(), "1.5");
    assert_eq!(Cell::text("  Дивиденды ").as_text(), "Дивиденды");
    assert!(Cell::text("   ").is_blank());
}

#[test]
fn test_quantity_is_truncated_magnitude() -> Result<()> {
    assert_eq!(quantity_from(Decimal::from_str("100")?), 100);
    assert_eq!(quantity_from(Decimal::from_str("10.9")?), 10);
    assert_eq!(quantity_from(Decimal::from_str("-5")?), 5);

    Ok(())
}

#[test]
fn test_currency_table_normalizes_known_spellings_only() {
    let table = CurrencyTable::standard();

    assert_eq!(table.normalize("РУБЛЬ"), "RUB");
    assert_eq!(table.normalize("Рубль"), "RUB");
    assert_eq!(table.normalize("USD"), "USD");
    assert_eq!(table.normalize("XYZ"), "XYZ");
    assert_eq!(table.lookup("usd"), None);
}
