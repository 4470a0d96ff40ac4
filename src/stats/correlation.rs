use crate::data::model::DataTable;

// ---------------------------------------------------------------------------
// Pearson correlation over the numeric columns of a table
// ---------------------------------------------------------------------------

/// Square Pearson correlation matrix. Entries are `NaN` where the
/// coefficient is undefined (constant column).
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major, `labels.len()` × `labels.len()`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

/// Correlations between every pair of numeric columns, in column order.
/// Returns `None` when the table has no numeric columns.
pub fn correlation_matrix(table: &DataTable) -> Option<CorrelationMatrix> {
    let labels = table.numeric_columns();
    if labels.is_empty() {
        return None;
    }

    let series: Vec<Vec<f64>> = labels
        .iter()
        .map(|name| {
            table
                .column(name)
                .expect("numeric_columns returns existing names")
                .filter_map(|c| c.as_f64())
                .collect()
        })
        .collect();

    let k = labels.len();
    let mut values = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        for j in i..k {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Some(CorrelationMatrix { labels, values })
}

/// Pearson's r; `NaN` when either side has zero variance or under two points.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}
