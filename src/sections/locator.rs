use std::ops::Range;

use crate::grid::Grid;

pub const CURRENCY_TRADES_ANCHOR: &str = "иностранная валюта";
pub const SECURITIES_TRADES_ANCHOR: &str = "2.1. сделки";

/// Lower-cases text and folds `ё` into `е` so header wording variants compare equal.
pub fn fold(text: &str) -> String {
    text.to_lowercase().replace('ё', "е")
}

/// Index of the first row in `rows` whose folded text contains every keyword.
///
/// First match wins; keywords must already be folded.
pub fn find_row(grid: &Grid, rows: Range<usize>, keywords: &[&str]) -> Option<usize> {
    let end = rows.end.min(grid.height());

    (rows.start..end).find(|&index| {
        let text = fold(&grid.row_text(index));
        keywords.iter().all(|keyword| text.contains(keyword))
    })
}

/// Index of the row right after the first row containing `anchor`.
pub fn find_block_start(grid: &Grid, anchor: &str) -> Option<usize> {
    find_row(grid, 0..grid.height(), &[anchor]).map(|index| index + 1)
}

/// Index of the first row in `rows` containing any of the anchors, or the end of `rows`.
pub fn block_end(grid: &Grid, rows: Range<usize>, anchors: &[&str]) -> usize {
    let end = rows.end.min(grid.height());

    anchors.iter()
        .filter_map(|anchor| find_row(grid, rows.start..end, &[*anchor]))
        .min()
        .unwrap_or(end)
}
