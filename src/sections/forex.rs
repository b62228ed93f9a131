use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::grid::Grid;
use crate::models::{DiagnosticReason, Field, Operation, OperationType, SectionKind};
use crate::sections::headers::{header_texts, positional_pair, resolve_pair, ColumnMap, RowContext, SynonymTable};
use crate::sections::locator::{find_block_start, find_row, fold, CURRENCY_TRADES_ANCHOR};
use crate::sections::state::Instrument;
use crate::sections::trades::{walk_trades, TradeRow};
use crate::sections::{ParseContext, SectionParser};
use crate::types::{quantity_from, Cell};

static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{6,}_TOM$").expect("valid currency pair regex")
});

const HEADER_KEYWORDS: &[&str] = &["дата", "номер", "время", "курс сделки", "объем в валюте", "объем в сопряж"];
const SETTLEMENT_LABEL: &str = "сопряж. валюта:";

const COLUMNS: SynonymTable = &[
    (Field::OperationId, &[&["номер"]]),
    (Field::Date, &[&["дата", "соверш"]]),
    (Field::Time, &[&["время", "соверш"]]),
    (Field::Comment, &[&["примеч"], &["коммент"], &["место сделки"]])
];

/// Spot currency deals grouped under `XXXYYY_TOM` instrument rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyTradesParser;

impl CurrencyTradesParser {
    fn columns(headers: &[String]) -> ColumnMap {
        let mut columns = ColumnMap::resolve(headers, COLUMNS);
        columns.insert_pair((Field::BuyPrice, Field::SellPrice), resolve_pair(headers, "курс", "покуп", "прода"));
        columns.insert_pair((Field::BuyQuantity, Field::SellQuantity), positional_pair(headers, "объем в валюте"));
        columns.insert_pair((Field::BuyPayment, Field::SellPayment), positional_pair(headers, "объем в сопряж"));
        columns
    }
}

impl SectionParser for CurrencyTradesParser {
    fn kind(&self) -> SectionKind {
        SectionKind::CurrencyTrades
    }

    fn parse(&self, grid: &Grid, context: &mut ParseContext) -> Vec<Operation> {
        let Some(start) = find_block_start(grid, CURRENCY_TRADES_ANCHOR) else {
            context.diagnostics.section(self.kind(), DiagnosticReason::SectionNotFound);
            return Vec::new();
        };
        let Some(header) = find_row(grid, start..grid.height(), HEADER_KEYWORDS) else {
            warn!("Currency trades block found without a header row");
            context.diagnostics.section(self.kind(), DiagnosticReason::HeaderNotFound);
            return Vec::new();
        };

        let columns = Self::columns(&header_texts(grid, header));
        let diagnostics = &mut context.diagnostics;

        let operations = walk_trades(grid, header + 1..grid.height(), classify_row, |index, instrument| {
            let row = RowContext::new(grid, index, &columns, SectionKind::CurrencyTrades);
            let date = row.date(Field::Date, diagnostics)?;
            let time = row.cell(Field::Time).time();

            let (operation_type, price, quantity, payment) = if row.cell(Field::BuyPrice).is_nonzero() {
                (OperationType::CurrencyBuy, Field::BuyPrice, Field::BuyQuantity, Field::BuyPayment)
            } else if row.cell(Field::SellPrice).is_nonzero() {
                (OperationType::CurrencySale, Field::SellPrice, Field::SellQuantity, Field::SellPayment)
            } else {
                diagnostics.row(SectionKind::CurrencyTrades, row.display_row(), DiagnosticReason::NoTradeSide);
                return None;
            };

            let quantity = quantity_from(row.amount(quantity, diagnostics));
            debug!("Row {}: {} {} x{quantity}", row.display_row(), operation_type.as_str(), instrument.ticker);
            Some(
                Operation::new(date.and_time(time), operation_type, row.amount(payment, diagnostics), instrument.currency.as_str())
                    .with_instrument(instrument.ticker.as_str(), "")
                    .with_trade(row.amount(price, diagnostics), quantity, Decimal::ZERO)
                    .with_comment(row.text(Field::Comment))
                    .with_operation_id(row.text(Field::OperationId))
            )
        });

        info!("Currency trades: {} records", operations.len());
        operations
    }
}

fn classify_row(grid: &Grid, index: usize) -> TradeRow {
    let cells = grid.row(index);

    if cells.iter().any(|cell| fold(&cell.as_text()).contains("итого")) {
        TradeRow::Subtotal
    } else if let Some(instrument) = declared_pair(cells) {
        TradeRow::Declaration(instrument)
    } else if grid.is_blank_row(index) {
        TradeRow::End
    } else {
        TradeRow::Trade
    }
}

/// Instrument declared by a row holding a `XXXYYY_TOM` cell.
///
/// The settlement currency sits two cells right of the `Сопряж. валюта:` label.
fn declared_pair(cells: &[Cell]) -> Option<Instrument> {
    let pair = cells.iter().find_map(|cell| match cell {
        Cell::Text(text) if PAIR_RE.is_match(text.trim()) => Some(text.trim()),
        _ => None
    })?;

    let ticker: String = pair.split('+').next().unwrap_or(pair).chars().take(6).collect();
    let currency = cells.iter()
        .position(|cell| fold(&cell.as_text()).contains(SETTLEMENT_LABEL))
        .and_then(|label| cells.get(label + 2))
        .map(Cell::as_text)
        .unwrap_or_default();

    Some(Instrument { ticker, isin: String::new(), currency })
}
