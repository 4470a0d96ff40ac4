use super::model::{CellValue, DataTable};

/// Columns removed before analysis: identifiers and features the bundled
/// models were not trained on.
pub const DROP_COLUMNS: [&str; 4] = ["Weight", "Acidity", "Crunchiness", "A_id"];

/// Outcome of a cleaning pass, with enough detail for a summary line.
#[derive(Debug, Clone)]
pub struct CleanReport {
    pub table: DataTable,
    /// Drop-list columns that were actually present and removed.
    pub dropped_columns: Vec<String>,
    /// Rows removed because they still held missing values.
    pub rows_dropped: usize,
}

/// Drop the fixed column list (only the ones present), then remove every row
/// that still contains a missing value. Column drop runs first, so nulls in a
/// dropped column never cost a row.
pub fn clean_table(raw: &DataTable) -> CleanReport {
    let keep: Vec<usize> = raw
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| !DROP_COLUMNS.contains(&name.as_str()))
        .map(|(i, _)| i)
        .collect();

    let dropped_columns: Vec<String> = raw
        .columns()
        .iter()
        .filter(|name| DROP_COLUMNS.contains(&name.as_str()))
        .cloned()
        .collect();

    let columns: Vec<String> = keep.iter().map(|&i| raw.columns()[i].clone()).collect();

    let mut rows_dropped = 0;
    let mut rows: Vec<Vec<CellValue>> = Vec::with_capacity(raw.n_rows());
    for row in raw.rows() {
        let projected: Vec<CellValue> = keep.iter().map(|&i| row[i].clone()).collect();
        if projected.iter().any(CellValue::is_null) {
            rows_dropped += 1;
        } else {
            rows.push(projected);
        }
    }

    let table =
        DataTable::new(columns, rows).expect("projection keeps every row the same width");

    CleanReport {
        table,
        dropped_columns,
        rows_dropped,
    }
}
