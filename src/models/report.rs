use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Diagnostic, Operation};

/// Account-level facts found above the cash operations table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeaderMetadata {
    pub account_id: Option<String>,
    pub account_agreement_date: Option<NaiveDate>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    /// Cash operation labels that were not recognized, in order of appearance.
    pub unknown_operations: Vec<String>
}

/// Final result of parsing one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatementReport {
    #[serde(flatten)]
    pub metadata: HeaderMetadata,
    pub operations: Vec<Operation>,
    pub warnings: Vec<Diagnostic>
}
