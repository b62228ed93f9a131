mod cell;
mod coercion;
mod currency;
mod errors;
#[cfg(test)]
mod tests;

pub use cell::Cell;
pub use coercion::{extract_isin, format_timestamp, parse_date, quantity_from, serial_to_timestamp};
pub use currency::CurrencyTable;
pub use errors::CoercionError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
