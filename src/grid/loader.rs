use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::grid::{Grid, GridError};
use crate::types::{serial_to_timestamp, Cell, DATE_FORMAT};

const SUPPORTED_EXTENSIONS: [&str; 2] = ["xls", "xlsx"];

/// Loads the first worksheet of an `.xls` / `.xlsx` statement into a tagged grid.
///
/// # Errors
/// Returns `GridError` when the extension is not supported, the workbook cannot be
/// opened, or it has no readable worksheet.
pub fn load_grid(path: &Path) -> Result<Grid, GridError> {
    let supported = path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| SUPPORTED_EXTENSIONS.iter().any(|known| extension.eq_ignore_ascii_case(known)))
        .unwrap_or(false);

    if !supported {
        return Err(GridError::unsupported_extension(path));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|error| GridError::open(path, error))?;

    first_worksheet(&mut workbook)
}

/// Loads a statement held in memory; the workbook format is detected from its content.
pub fn load_grid_from_bytes(bytes: Vec<u8>) -> Result<Grid, GridError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(GridError::OpenBytes)?;

    first_worksheet(&mut workbook)
}

fn first_worksheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Grid, GridError> {
    let range = workbook.worksheet_range_at(0)
        .ok_or(GridError::NoWorksheet)?
        .map_err(GridError::Worksheet)?;

    let origin = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let rows: Vec<Vec<Cell>> = range.rows()
        .map(|row| row.iter().map(tag_cell).collect())
        .collect();

    debug!("Loaded worksheet with {} rows starting at row {}", rows.len(), origin + 1);

    Ok(Grid::new(rows).with_origin(origin))
}

fn tag_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(text) if text.trim().is_empty() => Cell::Empty,
        Data::String(text) | Data::DurationIso(text) => Cell::text(text.as_str()),
        Data::Int(number) => Cell::Number(*number as f64),
        Data::Float(number) => Cell::Number(*number),
        Data::Bool(flag) => Cell::text(flag.to_string()),
        //NOTE: Time-only values have no day part and stay numeric so they can still be read as a time of day
        Data::DateTime(value) => serial_to_timestamp(value.as_f64())
            .map(Cell::Date)
            .unwrap_or_else(|_| Cell::Number(value.as_f64())),
        Data::DateTimeIso(text) => parse_iso(text)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::text(text.as_str()))
    }
}

fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(text, DATE_FORMAT).ok().map(|date| date.and_time(chrono::NaiveTime::MIN)))
}
