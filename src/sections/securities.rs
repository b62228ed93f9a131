use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::grid::Grid;
use crate::models::{DiagnosticReason, Diagnostics, Field, Operation, OperationType, SectionKind};
use crate::sections::headers::{header_texts, resolve_pair, ColumnMap, RowContext, SynonymTable};
use crate::sections::locator::{find_block_start, find_row, fold, SECURITIES_TRADES_ANCHOR};
use crate::sections::state::Instrument;
use crate::sections::trades::{walk_trades, TradeRow};
use crate::sections::{ParseContext, SectionParser};
use crate::types::{quantity_from, Cell};

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<ticker>\S+).*?ISIN[:\s]*(?P<isin>[A-Z0-9]{12})").expect("valid instrument regex")
});

const STOCK_HEADER: &[&str] = &["дата", "номер", "куплено", "продано", "сумма", "валюта", "дата соверш", "время соверш"];
const BOND_HEADER: &[&str] = &["совершена", "номер", "куплено", "продано", "сумма", "валюта", "нкд покупки", "нкд продажи"];

const STOCK_COLUMNS: SynonymTable = &[
    (Field::OperationId, &[&["номер"]]),
    (Field::BuyQuantity, &[&["куплено"]]),
    (Field::SellQuantity, &[&["продано"]]),
    (Field::BuyPayment, &[&["сумма", "платеж"], &["платеж"]]),
    (Field::SellPayment, &[&["сумма", "выруч"], &["выручка"]]),
    (Field::Currency, &[&["валют"]]),
    (Field::Date, &[&["дата соверш"], &["совершена"]]),
    (Field::Time, &[&["время соверш"]]),
    (Field::Comment, &[&["примеч"], &["коммент"]])
];

const BOND_COLUMNS: SynonymTable = &[
    (Field::OperationId, &[&["номер"]]),
    (Field::BuyQuantity, &[&["куплено"]]),
    (Field::SellQuantity, &[&["продано"]]),
    (Field::BuyPayment, &[&["сумма", "платеж"], &["платеж"]]),
    (Field::SellPayment, &[&["сумма", "выруч"], &["выручка"]]),
    (Field::Currency, &[&["валют"]]),
    (Field::Date, &[&["совершена"], &["дата соверш"]]),
    (Field::BuyAci, &[&["нкд", "покупки"]]),
    (Field::SellAci, &[&["нкд", "продажи"]]),
    (Field::Comment, &[&["примеч"], &["коммент"]])
];

/// Instrument class of a sub-block inside the securities trades section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentClass {
    Stock,
    Bond
}

impl InstrumentClass {
    /// Sub-block marker detection. Instrument declaration rows are never markers.
    pub fn of_marker(grid: &Grid, index: usize) -> Option<Self> {
        if is_declaration(grid.row(index)) {
            return None;
        }

        let text = fold(&grid.row_text(index));
        if text.contains("акция") || text.contains("адр") {
            Some(InstrumentClass::Stock)
        } else if text.contains("облигация") {
            Some(InstrumentClass::Bond)
        } else {
            None
        }
    }

    fn section(&self) -> SectionKind {
        match self {
            InstrumentClass::Stock => SectionKind::StockTrades,
            InstrumentClass::Bond => SectionKind::BondTrades
        }
    }

    fn header_keywords(&self) -> &'static [&'static str] {
        match self {
            InstrumentClass::Stock => STOCK_HEADER,
            InstrumentClass::Bond => BOND_HEADER
        }
    }

    fn columns(&self, headers: &[String]) -> ColumnMap {
        let table = match self {
            InstrumentClass::Stock => STOCK_COLUMNS,
            InstrumentClass::Bond => BOND_COLUMNS
        };

        let mut columns = ColumnMap::resolve(headers, table);
        columns.insert_pair((Field::BuyPrice, Field::SellPrice), resolve_pair(headers, "цена", "покуп", "прода"));
        columns
    }
}

/// Stock and bond deals of the `2.1. Сделки` section.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecuritiesTradesParser;

impl SecuritiesTradesParser {
    fn parse_block(&self, grid: &Grid, class: InstrumentClass, start: usize, end: usize, diagnostics: &mut Diagnostics) -> Vec<Operation> {
        let Some(header) = find_row(grid, start..end, class.header_keywords()) else {
            diagnostics.section(class.section(), DiagnosticReason::HeaderNotFound);
            return Vec::new();
        };

        let columns = class.columns(&header_texts(grid, header));

        walk_trades(grid, header + 1..end, classify_row, |index, instrument| {
            let row = RowContext::new(grid, index, &columns, class.section());
            let date = row.date(Field::Date, diagnostics)?;
            let time = row.cell(Field::Time).time();

            let bought = row.amount(Field::BuyQuantity, diagnostics);
            let sold = row.amount(Field::SellQuantity, diagnostics);
            let (operation_type, quantity, price, payment, aci) = if bought > Decimal::ZERO {
                (OperationType::Buy, bought, Field::BuyPrice, Field::BuyPayment, Field::BuyAci)
            } else if sold > Decimal::ZERO {
                (OperationType::Sell, sold, Field::SellPrice, Field::SellPayment, Field::SellAci)
            } else {
                diagnostics.row(class.section(), row.display_row(), DiagnosticReason::NoTradeSide);
                return None;
            };

            let aci = match class {
                InstrumentClass::Bond => row.amount(aci, diagnostics),
                InstrumentClass::Stock => Decimal::ZERO
            };

            debug!("Row {}: {} {} x{quantity}", row.display_row(), operation_type.as_str(), instrument.ticker);
            Some(
                Operation::new(date.and_time(time), operation_type, row.amount(payment, diagnostics), row.text(Field::Currency))
                    .with_instrument(instrument.ticker.as_str(), instrument.isin.as_str())
                    .with_trade(row.amount(price, diagnostics), quantity_from(quantity), aci)
                    .with_comment(row.text(Field::Comment))
                    .with_operation_id(row.text(Field::OperationId))
            )
        })
    }
}

impl SectionParser for SecuritiesTradesParser {
    fn kind(&self) -> SectionKind {
        SectionKind::SecuritiesTrades
    }

    fn parse(&self, grid: &Grid, context: &mut ParseContext) -> Vec<Operation> {
        let Some(start) = find_block_start(grid, SECURITIES_TRADES_ANCHOR) else {
            context.diagnostics.section(self.kind(), DiagnosticReason::SectionNotFound);
            return Vec::new();
        };

        let markers: Vec<(usize, InstrumentClass)> = (start..grid.height())
            .filter_map(|index| InstrumentClass::of_marker(grid, index).map(|class| (index, class)))
            .collect();

        let mut operations = Vec::new();
        for (position, (marker, class)) in markers.iter().enumerate() {
            let end = markers.get(position + 1).map(|(next, _)| *next).unwrap_or(grid.height());
            let found = self.parse_block(grid, *class, marker + 1, end, &mut context.diagnostics);
            debug!("{class:?} block at row {}: {} records", grid.display_row(*marker), found.len());
            operations.extend(found);
        }

        info!("Securities trades: {} records in {} blocks", operations.len(), markers.len());
        operations
    }
}

fn classify_row(grid: &Grid, index: usize) -> TradeRow {
    let cells = grid.row(index);

    if grid.is_blank_row(index) {
        TradeRow::End
    } else if cells.iter().any(|cell| matches!(cell, Cell::Text(text) if fold(text.trim()).starts_with("итого"))) {
        TradeRow::Subtotal
    } else if is_declaration(cells) {
        TradeRow::Declaration(declared_instrument(&grid.row_text(index)))
    } else {
        TradeRow::Trade
    }
}

fn is_declaration(cells: &[Cell]) -> bool {
    cells.iter().any(|cell| match cell {
        Cell::Text(text) => {
            let text = fold(text);
            text.contains("номер рег") || text.contains("isin")
        }
        _ => false
    })
}

/// Ticker is the first token of the row, ISIN the twelve characters after `ISIN`.
fn declared_instrument(row_text: &str) -> Instrument {
    match DECLARATION_RE.captures(row_text) {
        Some(captures) => Instrument {
            ticker: captures["ticker"].to_string(),
            isin: captures["isin"].to_string(),
            currency: String::new()
        },
        None => Instrument::default()
    }
}
