use ndarray::Array2;
use thiserror::Error;

use crate::data::model::{CellValue, DataError, DataTable};
use crate::model::{ConfusionMatrix, LabelError, ModelError, ModelSet};

// ---------------------------------------------------------------------------
// Batch inference over a cleaned table
// ---------------------------------------------------------------------------

/// Feature columns the bundled models consume, in matrix order.
pub const FEATURE_COLUMNS: [&str; 4] = ["Size", "Sweetness", "Juiciness", "Ripeness"];

/// Ground-truth column; optional, only used for evaluation.
pub const TARGET_COLUMN: &str = "Quality";

#[derive(Debug, Error)]
pub enum InferError {
    #[error("the dataset has no rows")]
    EmptyTable,

    #[error("missing required feature columns: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),

    #[error("column '{column}', row {row}: '{value}' is not numeric")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("actual label in row {row}: {source}")]
    BadActualLabel { row: usize, source: LabelError },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Everything inference produces: the input table extended with one
/// `Prediction_<model>` column per model, and one confusion matrix per model
/// when the ground-truth column was present.
#[derive(Debug, Clone)]
pub struct InferenceOutcome {
    pub results: DataTable,
    pub confusion: Option<Vec<(String, ConfusionMatrix)>>,
}

/// Run every model of the set over the table.
///
/// Steps, in order: reject an empty table, check the feature columns are all
/// present, build the feature matrix, predict and append label columns, then
/// evaluate against the ground truth if there is one.
pub fn run_inference(table: &DataTable, models: &ModelSet) -> Result<InferenceOutcome, InferError> {
    if table.is_empty() {
        return Err(InferError::EmptyTable);
    }

    let x = feature_matrix(table)?;

    let mut results = table.clone();
    let mut predictions: Vec<(String, Vec<i64>)> = Vec::new();
    for model in models.models() {
        let preds = model.predict(&x)?;
        let labels: Vec<CellValue> = preds
            .iter()
            .map(|&id| {
                models
                    .codec()
                    .decode(id)
                    .map(|label| CellValue::Text(label.to_string()))
            })
            .collect::<Result<_, _>>()?;
        results.push_column(&format!("Prediction_{}", model.name()), labels)?;
        predictions.push((model.name().to_string(), preds.to_vec()));
    }

    let confusion = match table.column(TARGET_COLUMN) {
        Some(cells) => {
            let actual = encode_actual(cells, models)?;
            let matrices = predictions
                .iter()
                .map(|(name, preds)| {
                    ConfusionMatrix::from_pairs(&actual, preds).map(|m| (name.clone(), m))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Some(matrices)
        }
        None => None,
    };

    Ok(InferenceOutcome { results, confusion })
}

/// Rows × features matrix from the fixed feature columns.
fn feature_matrix(table: &DataTable) -> Result<Array2<f64>, InferError> {
    let mut indices = Vec::with_capacity(FEATURE_COLUMNS.len());
    let mut missing = Vec::new();
    for name in FEATURE_COLUMNS {
        match table.column_index(name) {
            Some(i) => indices.push((name, i)),
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(InferError::MissingFeatures(missing));
    }

    let mut flat = Vec::with_capacity(table.n_rows() * indices.len());
    for (row_no, row) in table.rows().iter().enumerate() {
        for (name, idx) in &indices {
            let value = row[*idx].as_f64().ok_or_else(|| InferError::NonNumeric {
                column: name.to_string(),
                row: row_no,
                value: row[*idx].to_string(),
            })?;
            flat.push(value);
        }
    }

    Ok(Array2::from_shape_vec((table.n_rows(), indices.len()), flat)
        .expect("flat buffer matches rows × features"))
}

/// Ground-truth column as class ids. Text labels go through the codec;
/// numeric cells with an integral value are taken as class ids, validated
/// the same way. Excel-sourced columns arrive as floats, so `1.0` must
/// count as class 1.
fn encode_actual<'a>(
    cells: impl Iterator<Item = &'a CellValue>,
    models: &ModelSet,
) -> Result<Vec<i64>, InferError> {
    cells
        .enumerate()
        .map(|(row, cell)| {
            let codec = models.codec();
            let encoded = match cell.as_f64() {
                Some(v) if v.fract() == 0.0 => {
                    let code = v as i64;
                    codec.decode(code).map(|_| code)
                }
                // Fractional numerics fall through and are rejected with
                // the offending value in the message.
                _ => codec.encode(&cell.to_string()),
            };
            encoded.map_err(|source| InferError::BadActualLabel { row, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ForestModel, LabelCodec, SvcModel};

    /// Forest from Size only, SVC from Sweetness only, so every expected
    /// prediction can be read off the fixture rows.
    fn toy_models() -> ModelSet {
        let forest = ForestModel::from_json(
            r#"{
                "name": "Random Forest",
                "n_features": 4,
                "trees": [
                    {"split": {"feature": 0, "threshold": 0.0,
                               "left": {"leaf": {"class": 0}},
                               "right": {"leaf": {"class": 1}}}}
                ]
            }"#,
        )
        .unwrap();
        let svc = SvcModel::from_json(
            r#"{
                "name": "SVC",
                "n_features": 4,
                "kernel": {"type": "linear"},
                "support_vectors": [[0.0, 1.0, 0.0, 0.0], [0.0, -1.0, 0.0, 0.0]],
                "alphas": [1.0, 1.0],
                "support_labels": [1.0, -1.0],
                "bias": 0.0,
                "classes": [0, 1]
            }"#,
        )
        .unwrap();
        ModelSet::new(
            LabelCodec::binary_quality(),
            vec![Box::new(forest), Box::new(svc)],
        )
        .unwrap()
    }

    fn fixture(with_target: bool) -> DataTable {
        let mut columns: Vec<String> = FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect();
        if with_target {
            columns.push(TARGET_COLUMN.to_string());
        }
        let data = [
            (1.0, 1.0, "good"),
            (-1.0, -1.0, "bad"),
            (1.0, -1.0, "bad"),
        ];
        let rows = data
            .iter()
            .map(|&(size, sweetness, quality)| {
                let mut row = vec![
                    CellValue::Float(size),
                    CellValue::Float(sweetness),
                    CellValue::Float(0.0),
                    CellValue::Float(0.0),
                ];
                if with_target {
                    row.push(CellValue::Text(quality.to_string()));
                }
                row
            })
            .collect();
        DataTable::new(columns, rows).unwrap()
    }

    #[test]
    fn appends_prediction_columns_in_model_order() {
        let outcome = run_inference(&fixture(true), &toy_models()).unwrap();
        let cols = outcome.results.columns();
        assert_eq!(cols[cols.len() - 2], "Prediction_Random Forest");
        assert_eq!(cols[cols.len() - 1], "Prediction_SVC");

        let forest_col: Vec<String> = outcome
            .results
            .column("Prediction_Random Forest")
            .unwrap()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(forest_col, vec!["good", "bad", "good"]);

        let svc_col: Vec<String> = outcome
            .results
            .column("Prediction_SVC")
            .unwrap()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(svc_col, vec!["good", "bad", "bad"]);
    }

    #[test]
    fn confusion_matrices_follow_the_target_column() {
        let outcome = run_inference(&fixture(true), &toy_models()).unwrap();
        let confusion = outcome.confusion.unwrap();
        assert_eq!(confusion.len(), 2);

        // Forest mislabels the (1.0, -1.0) row as good.
        let (name, forest_cm) = &confusion[0];
        assert_eq!(name, "Random Forest");
        assert_eq!(forest_cm.count(0, 1), 1);
        assert_eq!(forest_cm.total(), 3);
        assert!((forest_cm.accuracy().unwrap() - 2.0 / 3.0).abs() < 1e-12);

        // SVC gets all three right.
        let (_, svc_cm) = &confusion[1];
        assert_eq!(svc_cm.count(0, 0), 2);
        assert_eq!(svc_cm.count(1, 1), 1);
        assert_eq!(svc_cm.accuracy(), Some(1.0));
    }

    #[test]
    fn no_target_column_means_no_evaluation() {
        let outcome = run_inference(&fixture(false), &toy_models()).unwrap();
        assert!(outcome.confusion.is_none());
        assert!(outcome.results.has_column("Prediction_SVC"));
    }

    #[test]
    fn missing_features_are_listed_in_matrix_order() {
        let table = DataTable::new(
            vec!["Size".into(), "Ripeness".into()],
            vec![vec![CellValue::Float(0.0), CellValue::Float(0.0)]],
        )
        .unwrap();
        let err = run_inference(&table, &toy_models()).unwrap_err();
        match err {
            InferError::MissingFeatures(cols) => {
                assert_eq!(cols, vec!["Sweetness".to_string(), "Juiciness".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_table_is_rejected() {
        let table = DataTable::with_columns(
            FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        );
        assert!(matches!(
            run_inference(&table, &toy_models()),
            Err(InferError::EmptyTable)
        ));
    }

    #[test]
    fn non_numeric_feature_cell_is_located() {
        let mut rows = fixture(false).rows().to_vec();
        rows[1][2] = CellValue::Text("n/a".into());
        let table = DataTable::new(
            FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        )
        .unwrap();
        let err = run_inference(&table, &toy_models()).unwrap_err();
        match err {
            InferError::NonNumeric { column, row, value } => {
                assert_eq!(column, "Juiciness");
                assert_eq!(row, 1);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_actual_label_is_reported_with_its_row() {
        let mut table = fixture(false);
        table
            .push_column(
                TARGET_COLUMN,
                vec![
                    CellValue::Text("good".into()),
                    CellValue::Text("mediocre".into()),
                    CellValue::Text("bad".into()),
                ],
            )
            .unwrap();
        let err = run_inference(&table, &toy_models()).unwrap_err();
        assert!(matches!(err, InferError::BadActualLabel { row: 1, .. }));
    }

    #[test]
    fn numeric_ground_truth_is_used_as_class_ids() {
        let mut table = fixture(false);
        table
            .push_column(
                TARGET_COLUMN,
                vec![
                    CellValue::Integer(1),
                    CellValue::Integer(0),
                    CellValue::Integer(0),
                ],
            )
            .unwrap();
        let outcome = run_inference(&table, &toy_models()).unwrap();
        let (_, svc_cm) = &outcome.confusion.unwrap()[1];
        assert_eq!(svc_cm.accuracy(), Some(1.0));
    }

    #[test]
    fn float_ground_truth_is_accepted_as_class_ids() {
        // Excel numeric cells and CSV fields like "1.0" both land as floats.
        let mut table = fixture(false);
        table
            .push_column(
                TARGET_COLUMN,
                vec![
                    CellValue::Float(1.0),
                    CellValue::Float(0.0),
                    CellValue::Float(0.0),
                ],
            )
            .unwrap();
        let outcome = run_inference(&table, &toy_models()).unwrap();
        let (_, svc_cm) = &outcome.confusion.unwrap()[1];
        assert_eq!(svc_cm.accuracy(), Some(1.0));
    }

    #[test]
    fn fractional_ground_truth_is_rejected() {
        let mut table = fixture(false);
        table
            .push_column(
                TARGET_COLUMN,
                vec![
                    CellValue::Float(1.0),
                    CellValue::Float(0.5),
                    CellValue::Float(0.0),
                ],
            )
            .unwrap();
        let err = run_inference(&table, &toy_models()).unwrap_err();
        assert!(matches!(err, InferError::BadActualLabel { row: 1, .. }));
    }

    #[test]
    fn out_of_range_numeric_ground_truth_is_rejected() {
        let mut table = fixture(false);
        table
            .push_column(
                TARGET_COLUMN,
                vec![
                    CellValue::Integer(1),
                    CellValue::Integer(2),
                    CellValue::Integer(0),
                ],
            )
            .unwrap();
        let err = run_inference(&table, &toy_models()).unwrap_err();
        assert!(matches!(err, InferError::BadActualLabel { row: 1, .. }));
    }
}
