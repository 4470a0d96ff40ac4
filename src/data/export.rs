use anyhow::{Context, Result};

use super::model::{CellValue, DataTable};

/// Serialize a table to UTF-8 CSV bytes: header row first, then one record
/// per row. Missing values become empty fields.
pub fn table_to_csv_bytes(table: &DataTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(table.columns())
        .context("writing CSV header")?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(field))
            .context("writing CSV row")?;
    }
    writer.into_inner().context("flushing CSV buffer")
}

fn field(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_then_rows() {
        let table = DataTable::new(
            vec!["Size".into(), "Prediction_Random Forest".into()],
            vec![
                vec![CellValue::Float(-0.5), CellValue::Text("good".into())],
                vec![CellValue::Integer(2), CellValue::Text("bad".into())],
            ],
        )
        .unwrap();
        let bytes = table_to_csv_bytes(&table).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "Size,Prediction_Random Forest\n-0.5,good\n2,bad\n"
        );
    }

    #[test]
    fn nulls_become_empty_fields_and_commas_are_quoted() {
        let table = DataTable::new(
            vec!["Note".into(), "Size".into()],
            vec![vec![CellValue::Text("a,b".into()), CellValue::Null]],
        )
        .unwrap();
        let text = String::from_utf8(table_to_csv_bytes(&table).unwrap()).unwrap();
        assert_eq!(text, "Note,Size\n\"a,b\",\n");
    }
}
