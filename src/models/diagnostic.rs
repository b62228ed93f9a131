use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::debug;

use crate::models::{Field, SectionKind};

/// Why a section, row or field fell back to its best-effort default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticReason {
    SectionNotFound,
    HeaderNotFound,
    UnknownOperation {
        label: String
    },
    UnparseableDate {
        value: String
    },
    NumericDefault {
        field: Field,
        value: String
    },
    NoTradeSide
}

impl Display for DiagnosticReason {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticReason::SectionNotFound => write!(formatter, "section not found"),
            DiagnosticReason::HeaderNotFound => write!(formatter, "header row not found"),
            DiagnosticReason::UnknownOperation { label } => write!(formatter, "unknown operation [{label}]"),
            DiagnosticReason::UnparseableDate { value } => write!(formatter, "unparseable date [{value}], row dropped"),
            DiagnosticReason::NumericDefault { field, value } => {
                write!(formatter, "unparseable {field:?} [{value}], defaulted to zero")
            }
            DiagnosticReason::NoTradeSide => write!(formatter, "neither buy nor sell side populated, row skipped")
        }
    }
}

/// A best-effort decision made while parsing, kept so defaults stay observable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub section: SectionKind,
    /// One-based worksheet row, absent for section-level findings.
    pub row: Option<usize>,
    pub reason: DiagnosticReason
}

/// Append-only collector of diagnostics for a single parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>
}

impl Diagnostics {
    pub fn section(&mut self, section: SectionKind, reason: DiagnosticReason) {
        debug!("[{section:?}] {reason}");
        self.entries.push(Diagnostic { section, row: None, reason });
    }

    pub fn row(&mut self, section: SectionKind, row: usize, reason: DiagnosticReason) {
        debug!("[{section:?}] row {row}: {reason}");
        self.entries.push(Diagnostic { section, row: Some(row), reason });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
