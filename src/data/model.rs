use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring the dtypes a CSV/XLSX upload can
/// carry. Used as a `BTreeMap` key for frequency counting, so it must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Missing value (empty cell).
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeMap/BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Whether this cell is a missing value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Try to interpret the value as an `f64` for numeric work.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Numeric cells are the ones charts and models can consume.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }

    /// Short form for on-screen tables: floats at four decimals. The
    /// `Display` impl keeps full precision for export.
    pub fn display_compact(&self) -> String {
        match self {
            CellValue::Float(v) => format!("{v:.4}"),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// DataTable – the in-memory table shared by all stages
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("column '{column}' has {actual} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// A rectangular table with named columns kept in their original file order.
///
/// There is no per-column dtype: every cell carries its own type and a column
/// counts as numeric only when all of its cells do.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// Build a table, validating that every row matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, DataError> {
        let width = columns.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(DataError::RowWidth {
                    row: i,
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        Ok(DataTable { columns, rows })
    }

    /// An empty table with headers only.
    pub fn with_columns(columns: Vec<String>) -> Self {
        DataTable {
            columns,
            rows: Vec::new(),
        }
    }

    /// Column names in original order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table holds zero rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// The first `n` rows, for head previews.
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..self.rows.len().min(n)]
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate over one column's cells, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Whether every cell of the column is `Integer` or `Float`.
    /// An empty table has no numeric columns.
    pub fn is_numeric_column(&self, name: &str) -> bool {
        match self.column(name) {
            Some(mut cells) => !self.rows.is_empty() && cells.all(|c| c.is_numeric()),
            None => false,
        }
    }

    /// Names of all numeric columns, in original column order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| self.is_numeric_column(c))
            .cloned()
            .collect()
    }

    /// Append a new column on the right. Fails on duplicate names or a value
    /// count that does not match the row count.
    pub fn push_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<(), DataError> {
        if self.has_column(name) {
            return Err(DataError::DuplicateColumn(name.to_string()));
        }
        if values.len() != self.rows.len() {
            return Err(DataError::ColumnLength {
                column: name.to_string(),
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        DataTable::new(
            vec!["Size".into(), "Quality".into(), "Note".into()],
            vec![
                vec![
                    CellValue::Float(1.5),
                    CellValue::Text("good".into()),
                    CellValue::Text("a".into()),
                ],
                vec![
                    CellValue::Integer(2),
                    CellValue::Text("bad".into()),
                    CellValue::Null,
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = DataTable::new(
            vec!["a".into(), "b".into()],
            vec![vec![CellValue::Integer(1)]],
        );
        assert!(matches!(err, Err(DataError::RowWidth { row: 0, .. })));
    }

    #[test]
    fn numeric_column_detection() {
        let t = table();
        assert!(t.is_numeric_column("Size"));
        assert!(!t.is_numeric_column("Quality"));
        assert!(!t.is_numeric_column("Missing"));
        assert_eq!(t.numeric_columns(), vec!["Size".to_string()]);
    }

    #[test]
    fn empty_table_has_no_numeric_columns() {
        let t = DataTable::with_columns(vec!["Size".into()]);
        assert!(!t.is_numeric_column("Size"));
        assert!(t.numeric_columns().is_empty());
    }

    #[test]
    fn push_column_appends_in_order() {
        let mut t = table();
        t.push_column(
            "Prediction",
            vec![CellValue::Text("good".into()), CellValue::Text("bad".into())],
        )
        .unwrap();
        assert_eq!(t.columns().last().map(String::as_str), Some("Prediction"));
        assert_eq!(t.rows()[1][3], CellValue::Text("bad".into()));
    }

    #[test]
    fn push_column_rejects_bad_length_and_duplicates() {
        let mut t = table();
        assert!(matches!(
            t.push_column("Extra", vec![CellValue::Null]),
            Err(DataError::ColumnLength { .. })
        ));
        assert!(matches!(
            t.push_column("Size", vec![CellValue::Null, CellValue::Null]),
            Err(DataError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn cell_ordering_groups_types() {
        let mut vals = vec![
            CellValue::Text("b".into()),
            CellValue::Integer(3),
            CellValue::Null,
            CellValue::Float(0.5),
            CellValue::Text("a".into()),
        ];
        vals.sort();
        assert_eq!(vals[0], CellValue::Null);
        assert_eq!(vals.last(), Some(&CellValue::Text("b".into())));
    }

    #[test]
    fn as_f64_covers_both_numeric_kinds() {
        assert_eq!(CellValue::Integer(4).as_f64(), Some(4.0));
        assert_eq!(CellValue::Float(0.25).as_f64(), Some(0.25));
        assert_eq!(CellValue::Text("4".into()).as_f64(), None);
    }

    #[test]
    fn compact_display_rounds_floats_but_display_does_not() {
        assert_eq!(CellValue::Float(1.23456789).display_compact(), "1.2346");
        assert_eq!(CellValue::Float(1.23456789).to_string(), "1.23456789");
        assert_eq!(CellValue::Text("good".into()).display_compact(), "good");
    }
}
