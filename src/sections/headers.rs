use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::grid::Grid;
use crate::models::{DiagnosticReason, Diagnostics, Field, SectionKind};
use crate::sections::locator::fold;
use crate::types::Cell;

/// Ranked keyword sets per field. Every keyword of a set must appear in the same header cell.
pub type SynonymTable = &'static [(Field, &'static [&'static [&'static str]])];

static EMPTY_CELL: Cell = Cell::Empty;

/// Folded text of every cell in a header row, blank cells included so indices stay positional.
pub fn header_texts(grid: &Grid, index: usize) -> Vec<String> {
    grid.row(index).iter().map(|cell| fold(&cell.as_text())).collect()
}

/// First column whose header contains all keywords.
pub fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    headers.iter().position(|header| keywords.iter().all(|keyword| header.contains(keyword)))
}

/// Tries each synonym set in rank order; the first set matched by any column decides.
pub fn resolve_synonyms(headers: &[String], synonyms: &[&[&str]]) -> Option<usize> {
    synonyms.iter().find_map(|keywords| find_column(headers, keywords))
}

/// First and second columns containing `keyword`, assigned to buy and sell by position.
pub fn positional_pair(headers: &[String], keyword: &str) -> (Option<usize>, Option<usize>) {
    let mut matches = headers.iter().enumerate()
        .filter(|(_, header)| header.contains(keyword))
        .map(|(column, _)| column);

    (matches.next(), matches.next())
}

/// Resolves a buy/sell column pair sharing a generic keyword.
///
/// Secondary keywords are tried first. When they do not yield two distinct columns the
/// pair falls back to position: first occurrence is buy, second is sell.
pub fn resolve_pair(headers: &[String], generic: &str, buy: &str, sell: &str) -> (Option<usize>, Option<usize>) {
    match (find_column(headers, &[generic, buy]), find_column(headers, &[generic, sell])) {
        (Some(buy_column), Some(sell_column)) if buy_column != sell_column => (Some(buy_column), Some(sell_column)),
        _ => positional_pair(headers, generic)
    }
}

/// Field to column assignment for one located table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    columns: HashMap<Field, usize>
}

impl ColumnMap {
    pub fn resolve(headers: &[String], table: SynonymTable) -> Self {
        let mut map = Self::default();

        for (field, synonyms) in table {
            map.insert(*field, resolve_synonyms(headers, synonyms));
        }

        map
    }

    pub fn insert(&mut self, field: Field, column: Option<usize>) {
        if let Some(column) = column {
            self.columns.insert(field, column);
        }
    }

    pub fn insert_pair(&mut self, fields: (Field, Field), columns: (Option<usize>, Option<usize>)) {
        self.insert(fields.0, columns.0);
        self.insert(fields.1, columns.1);
    }

    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

/// Typed access to one data row through a resolved column map.
///
/// Reads of unresolved columns see an empty cell. Coercion fallbacks are recorded
/// in the diagnostics passed to each read.
pub struct RowContext<'a> {
    grid: &'a Grid,
    index: usize,
    columns: &'a ColumnMap,
    section: SectionKind
}

impl<'a> RowContext<'a> {
    pub fn new(grid: &'a Grid, index: usize, columns: &'a ColumnMap, section: SectionKind) -> Self {
        Self { grid, index, columns, section }
    }

    pub fn display_row(&self) -> usize {
        self.grid.display_row(self.index)
    }

    pub fn cell(&self, field: Field) -> &'a Cell {
        match self.columns.get(field) {
            Some(column) => self.grid.cell(self.index, column),
            None => &EMPTY_CELL
        }
    }

    pub fn text(&self, field: Field) -> String {
        self.cell(field).as_text()
    }

    pub fn amount(&self, field: Field, diagnostics: &mut Diagnostics) -> Decimal {
        let cell = self.cell(field);

        cell.amount().unwrap_or_else(|_| {
            diagnostics.row(self.section, self.display_row(), DiagnosticReason::NumericDefault {
                field,
                value: cell.as_text()
            });
            Decimal::ZERO
        })
    }

    pub fn date(&self, field: Field, diagnostics: &mut Diagnostics) -> Option<NaiveDate> {
        let cell = self.cell(field);

        match cell.date() {
            Ok(date) => Some(date),
            Err(_) => {
                diagnostics.row(self.section, self.display_row(), DiagnosticReason::UnparseableDate {
                    value: cell.as_text()
                });
                None
            }
        }
    }
}
