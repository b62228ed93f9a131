use std::ops::Range;

use tracing::debug;

use crate::grid::Grid;
use crate::models::Operation;
use crate::sections::state::{Instrument, InstrumentState};

/// Role of one row inside a trade table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeRow {
    /// All-empty row, terminates the table.
    End,
    Subtotal,
    Declaration(Instrument),
    Trade
}

/// Drives the instrument state machine over the data rows of a trade table.
///
/// `build` is called for every trade row with the active instrument and may decline the row.
pub fn walk_trades<C, B>(grid: &Grid, rows: Range<usize>, classify: C, mut build: B) -> Vec<Operation>
where
    C: Fn(&Grid, usize) -> TradeRow,
    B: FnMut(usize, &Instrument) -> Option<Operation>
{
    let mut state = InstrumentState::Idle;
    let mut operations = Vec::new();
    let end = rows.end.min(grid.height());

    for index in rows.start..end {
        match classify(grid, index) {
            TradeRow::End => {
                debug!("Trade table ends at row {}", grid.display_row(index));
                break;
            }
            TradeRow::Subtotal => continue,
            TradeRow::Declaration(instrument) => {
                debug!("Instrument [{}] declared at row {}", instrument.ticker, grid.display_row(index));
                state.declare(instrument);
            }
            TradeRow::Trade => {
                if let Some(operation) = build(index, &state.instrument()) {
                    operations.push(operation);
                }
            }
        }
    }

    operations
}
