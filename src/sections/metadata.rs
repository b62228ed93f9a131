use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::grid::Grid;
use crate::models::HeaderMetadata;
use crate::types::parse_date;

static AGREEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Генеральное соглашение:\s*(\d+)").expect("valid agreement regex")
});

static AGREEMENT_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"от\s+(\d{2}\.\d{2}\.\d{4})").expect("valid agreement date regex")
});

const AGREEMENT_MARKER: &str = "Генеральное соглашение:";
const PERIOD_MARKER: &str = "Период:";

/// Reads account metadata from the given rows. Later matches overwrite earlier ones.
pub fn extract_metadata(grid: &Grid, rows: Range<usize>, metadata: &mut HeaderMetadata) {
    let end = rows.end.min(grid.height());

    for index in rows.start..end {
        apply_row(&grid.row_text(index), metadata);
    }
}

fn apply_row(text: &str, metadata: &mut HeaderMetadata) {
    if text.contains(AGREEMENT_MARKER) {
        if let Some(captures) = AGREEMENT_RE.captures(text) {
            metadata.account_id = Some(captures[1].to_string());
        }
        if let Some(captures) = AGREEMENT_DATE_RE.captures(text) {
            metadata.account_agreement_date = parse_date(&captures[1]).ok();
        }
        debug!("Agreement row [{text}]");
    } else if text.contains(PERIOD_MARKER) {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let after = |marker: &str| tokens.iter()
            .position(|token| *token == marker)
            .and_then(|position| tokens.get(position + 1));

        if let (Some(start), Some(end)) = (after("с"), after("по")) {
            metadata.period_start = parse_date(start).ok();
            metadata.period_end = parse_date(end).ok();
            debug!("Period row [{text}]");
        }
    }
}
