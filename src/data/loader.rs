use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};

use super::model::{CellValue, DataTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with column names, one record per line
/// * `.xlsx` – first worksheet, first row used as the header
pub fn load_file(path: &Path) -> Result<DataTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "xlsx" => load_xlsx(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<DataTable> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    load_csv_reader(file)
}

/// Parse CSV from any reader. Cell types are guessed per cell: integers
/// before floats, `true`/`false` as booleans, everything else as text.
pub fn load_csv_reader<R: Read>(input: R) -> Result<DataTable> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV file has no header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    DataTable::new(headers, rows).context("assembling CSV table")
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        // "NaN" tokens count as missing, matching how the CSVs were exported.
        if f.is_nan() {
            return CellValue::Null;
        }
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// XLSX loader
// ---------------------------------------------------------------------------

/// Load the first worksheet of an XLSX workbook. The first row supplies the
/// column names; blank header cells get a positional fallback name.
fn load_xlsx(path: &Path) -> Result<DataTable> {
    let mut workbook: Xlsx<_> = open_workbook(path).context("opening XLSX workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("XLSX workbook has no sheets")?
        .context("reading first worksheet")?;

    let mut row_iter = range.rows();
    let header_row = row_iter.next().context("XLSX sheet has no header row")?;

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell.to_string();
            if name.trim().is_empty() {
                format!("column_{}", i + 1)
            } else {
                name
            }
        })
        .collect();

    let rows: Vec<Vec<CellValue>> = row_iter
        .map(|row| row.iter().map(cell_from_xlsx).collect())
        .collect();

    DataTable::new(headers, rows).context("assembling XLSX table")
}

fn cell_from_xlsx(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) if f.is_nan() => CellValue::Null,
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(_) => CellValue::Null,
        // Dates and durations kept as text.
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_preserves_column_order_and_guesses_types() {
        let data = "A_id,Size,Quality\n1,-0.5,good\n2,1.25,bad\n";
        let table = load_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(
            table.columns(),
            &["A_id".to_string(), "Size".to_string(), "Quality".to_string()]
        );
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.rows()[0][0], CellValue::Integer(1));
        assert_eq!(table.rows()[0][1], CellValue::Float(-0.5));
        assert_eq!(table.rows()[1][2], CellValue::Text("bad".into()));
    }

    #[test]
    fn csv_empty_and_nan_cells_are_null() {
        let data = "Size,Sweetness\n,NaN\n1.0,2.0\n";
        let table = load_csv_reader(data.as_bytes()).unwrap();
        assert!(table.rows()[0][0].is_null());
        assert!(table.rows()[0][1].is_null());
        assert!(!table.rows()[1][0].is_null());
    }

    #[test]
    fn csv_with_header_only_loads_empty_table() {
        let data = "Size,Sweetness,Quality\n";
        let table = load_csv_reader(data.as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.n_cols(), 3);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("apples.parquet")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn xlsx_cell_conversion() {
        assert_eq!(cell_from_xlsx(&Data::Empty), CellValue::Null);
        assert_eq!(cell_from_xlsx(&Data::Float(1.5)), CellValue::Float(1.5));
        assert_eq!(cell_from_xlsx(&Data::Int(3)), CellValue::Integer(3));
        assert_eq!(
            cell_from_xlsx(&Data::String("good".into())),
            CellValue::Text("good".into())
        );
        assert_eq!(cell_from_xlsx(&Data::String(String::new())), CellValue::Null);
    }
}
