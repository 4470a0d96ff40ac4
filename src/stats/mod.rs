/// Descriptive statistics backing the exploratory charts.

use std::collections::BTreeMap;

use crate::data::model::CellValue;

pub mod correlation;
pub mod histogram;

/// Frequency of each distinct non-null value, most frequent first.
/// Ties keep ascending value order, so the result is deterministic.
pub fn value_counts<'a>(cells: impl Iterator<Item = &'a CellValue>) -> Vec<(CellValue, usize)> {
    let mut counts: BTreeMap<CellValue, usize> = BTreeMap::new();
    for cell in cells {
        if cell.is_null() {
            continue;
        }
        *counts.entry(cell.clone()).or_insert(0) += 1;
    }
    let mut pairs: Vec<(CellValue, usize)> = counts.into_iter().collect();
    // Stable sort preserves the ascending value order among equal counts.
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}
