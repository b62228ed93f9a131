use chrono::NaiveTime;
use tracing::{debug, info};

use crate::grid::Grid;
use crate::models::{DiagnosticReason, Field, Operation, SectionKind};
use crate::sections::headers::{header_texts, ColumnMap, RowContext, SynonymTable};
use crate::sections::locator::{block_end, find_row, fold, CURRENCY_TRADES_ANCHOR, SECURITIES_TRADES_ANCHOR};
use crate::sections::metadata::extract_metadata;
use crate::sections::state::CurrencyState;
use crate::sections::vocabulary::CashVocabulary;
use crate::sections::{ParseContext, SectionParser};
use crate::types::{extract_isin, CurrencyTable};

const HEADER_KEYWORDS: &[&str] = &["дата", "операция", "зачислен"];

const COLUMNS: SynonymTable = &[
    (Field::Date, &[&["дата"]]),
    (Field::Operation, &[&["операция"]]),
    (Field::Credit, &[&["зачислен"]]),
    (Field::Debit, &[&["списани"]]),
    (Field::Comment, &[&["примеч"], &["коммент"]])
];

/// Money movements table: dividends, coupons, fees, taxes, deposits and withdrawals.
///
/// Also collects header metadata from the rows above the table.
#[derive(Debug, Clone, Default)]
pub struct CashOperationsParser {
    vocabulary: CashVocabulary,
    currencies: CurrencyTable
}

impl CashOperationsParser {
    pub fn new(vocabulary: CashVocabulary, currencies: CurrencyTable) -> Self {
        Self { vocabulary, currencies }
    }
}

impl SectionParser for CashOperationsParser {
    fn kind(&self) -> SectionKind {
        SectionKind::CashOperations
    }

    fn parse(&self, grid: &Grid, context: &mut ParseContext) -> Vec<Operation> {
        let Some(header) = find_row(grid, 0..grid.height(), HEADER_KEYWORDS) else {
            extract_metadata(grid, 0..grid.height(), &mut context.metadata);
            context.diagnostics.section(self.kind(), DiagnosticReason::HeaderNotFound);
            return Vec::new();
        };

        extract_metadata(grid, 0..header, &mut context.metadata);

        let columns = ColumnMap::resolve(&header_texts(grid, header), COLUMNS);
        let mut currency = CurrencyState::new(self.currencies);
        for index in 0..header {
            currency.observe(&grid.row_text(index));
        }

        let end = block_end(grid, header + 1..grid.height(), &[CURRENCY_TRADES_ANCHOR, SECURITIES_TRADES_ANCHOR]);
        let mut operations = Vec::new();
        for index in header + 1..end {
            let text = grid.row_text(index);
            if text.is_empty() || currency.observe(&text) || fold(&text).contains("итого") {
                continue;
            }

            let row = RowContext::new(grid, index, &columns, self.kind());
            let label = row.text(Field::Operation);
            if !self.vocabulary.accepts(&label) {
                context.diagnostics.row(self.kind(), row.display_row(), DiagnosticReason::UnknownOperation {
                    label: label.clone()
                });
                context.metadata.unknown_operations.push(label);
                continue;
            }

            let Some(date) = row.date(Field::Date, &mut context.diagnostics) else {
                continue;
            };
            let credit = row.amount(Field::Credit, &mut context.diagnostics);
            let debit = row.amount(Field::Debit, &mut context.diagnostics);
            let payment = if credit.is_zero() { debit } else { credit };
            let comment = row.text(Field::Comment);
            let operation_type = self.vocabulary.classify(&label, credit);

            debug!("Row {}: [{label}] -> {}", row.display_row(), operation_type.as_str());
            operations.push(
                Operation::new(date.and_time(NaiveTime::MIN), operation_type, payment, currency.current())
                    .with_instrument("", extract_isin(&comment))
                    .with_comment(comment)
            );
        }

        info!("Cash operations: {} records", operations.len());
        operations
    }
}
