mod cash;
mod forex;
mod headers;
mod locator;
mod metadata;
mod securities;
mod state;
mod trades;
mod vocabulary;

use crate::grid::Grid;
use crate::models::{Diagnostics, HeaderMetadata, Operation, SectionKind};

pub use cash::CashOperationsParser;
pub use forex::CurrencyTradesParser;
pub use securities::SecuritiesTradesParser;
pub use vocabulary::CashVocabulary;

/// Mutable state shared by the section parsers of one statement parse.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    pub metadata: HeaderMetadata,
    pub diagnostics: Diagnostics
}

/// One logical table of a statement.
///
/// Parsers never fail: a missing section or header yields no operations and a diagnostic.
pub trait SectionParser: Send + Sync {
    fn kind(&self) -> SectionKind;

    fn parse(&self, grid: &Grid, context: &mut ParseContext) -> Vec<Operation>;
}
