use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::spawn_blocking;
use tracing::{error, info, warn};

use crate::engine::StatementError;
use crate::grid::{load_grid, load_grid_from_bytes, Grid};
use crate::models::{Operation, StatementReport};
use crate::sections::{CashOperationsParser, CashVocabulary, CurrencyTradesParser, ParseContext, SecuritiesTradesParser, SectionParser};
use crate::types::CurrencyTable;

/// Runs every section parser over one statement and merges the results.
#[derive(Clone)]
pub struct StatementEngine {
    parsers: Vec<Arc<dyn SectionParser>>,
    currencies: CurrencyTable
}

impl StatementEngine {
    /// Creates an engine with the cash, currency trades and securities trades parsers, in that order.
    pub fn new() -> Self {
        let cash: Arc<dyn SectionParser> = Arc::new(CashOperationsParser::new(CashVocabulary::standard(), CurrencyTable::standard()));
        let currency: Arc<dyn SectionParser> = Arc::new(CurrencyTradesParser);
        let securities: Arc<dyn SectionParser> = Arc::new(SecuritiesTradesParser);

        Self::with_parsers(vec![cash, currency, securities])
    }

    pub fn with_parsers(parsers: Vec<Arc<dyn SectionParser>>) -> Self {
        Self { parsers, currencies: CurrencyTable::standard() }
    }

    /// Parses an already loaded grid. Never fails; degraded input shows up in `warnings`.
    pub fn parse_grid(&self, grid: &Grid) -> StatementReport {
        let mut context = ParseContext::default();
        let mut operations: Vec<Operation> = Vec::new();

        for parser in &self.parsers {
            let found = parser.parse(grid, &mut context);
            info!("{:?}: {} operations", parser.kind(), found.len());
            operations.extend(found);
        }

        for operation in &mut operations {
            operation.currency = self.currencies.normalize(&operation.currency);
        }

        if !context.diagnostics.entries().is_empty() {
            warn!("Statement parsed with {} warnings", context.diagnostics.entries().len());
        }

        //NOTE: sort_by_key is stable, so same-day operations keep section order
        operations.sort_by_key(Operation::sort_key);

        StatementReport {
            metadata: context.metadata,
            operations,
            warnings: context.diagnostics.into_entries()
        }
    }

    pub fn parse_file(&self, path: &Path) -> Result<StatementReport, StatementError> {
        let grid = load_grid(path)?;
        Ok(self.parse_grid(&grid))
    }

    pub fn parse_bytes(&self, bytes: Vec<u8>) -> Result<StatementReport, StatementError> {
        let grid = load_grid_from_bytes(bytes)?;
        Ok(self.parse_grid(&grid))
    }

    /// Loads and parses a statement file on a blocking worker.
    pub async fn run(&self, path: PathBuf) -> Result<StatementReport, StatementError> {
        let engine = self.clone();

        spawn_blocking(move || engine.parse_file(&path)).await?
            .inspect_err(|error| error!("Statement parsing failed: {error}"))
    }

    /// Parses statement bytes, such as an upload read from stdin, on a blocking worker.
    pub async fn run_bytes(&self, bytes: Vec<u8>) -> Result<StatementReport, StatementError> {
        let engine = self.clone();

        spawn_blocking(move || engine.parse_bytes(bytes)).await?
            .inspect_err(|error| error!("Statement parsing failed: {error}"))
    }
}

impl Default for StatementEngine {
    fn default() -> Self {
        Self::new()
    }
}
