use crate::types::CurrencyTable;

pub const DEFAULT_CURRENCY: &str = "RUB";

/// Instrument identity declared on a separator row of a trade table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instrument {
    pub ticker: String,
    pub isin: String,
    /// Settlement currency, only known for currency-pair declarations.
    pub currency: String
}

/// Carry-forward instrument for one trade section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InstrumentState {
    #[default]
    Idle,
    Active(Instrument)
}

impl InstrumentState {
    pub fn declare(&mut self, instrument: Instrument) {
        *self = InstrumentState::Active(instrument);
    }

    /// Active instrument, or an empty one before any declaration.
    pub fn instrument(&self) -> Instrument {
        match self {
            InstrumentState::Idle => Instrument::default(),
            InstrumentState::Active(instrument) => instrument.clone()
        }
    }
}

/// Carry-forward currency for the cash operations table.
#[derive(Debug, Clone)]
pub struct CurrencyState {
    table: CurrencyTable,
    current: String
}

impl CurrencyState {
    pub fn new(table: CurrencyTable) -> Self {
        Self { table, current: DEFAULT_CURRENCY.to_string() }
    }

    /// Switches the active currency when the row text is a currency declaration.
    pub fn observe(&mut self, row_text: &str) -> bool {
        match self.table.lookup(row_text) {
            Some(code) => {
                self.current = code.to_string();
                true
            }
            None => false
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }
}
