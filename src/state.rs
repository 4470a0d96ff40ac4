use std::path::Path;

use crate::data::clean::{CleanReport, clean_table};
use crate::data::model::{CellValue, DataTable};
use crate::infer::{self, InferError, InferenceOutcome, TARGET_COLUMN};
use crate::model::ModelSet;
use crate::stats::correlation::{CorrelationMatrix, correlation_matrix};
use crate::stats::histogram::{Histogram, histogram};
use crate::stats::value_counts;

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// The three views of the app, selected in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Load,
    Explore,
    Infer,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Load, Stage::Explore, Stage::Infer];

    pub fn label(self) -> &'static str {
        match self {
            Stage::Load => "Load Dataset",
            Stage::Explore => "Exploratory Analysis",
            Stage::Infer => "Inference",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived caches
// ---------------------------------------------------------------------------

/// Chart inputs for the exploratory view, rebuilt when the dataset or the
/// target column changes.
pub struct ExploreView {
    /// Column charted in the frequency plot.
    pub target: String,
    pub counts: Vec<(CellValue, usize)>,
    /// One histogram per numeric column, in column order.
    pub histograms: Vec<(String, Histogram)>,
    pub correlation: Option<CorrelationMatrix>,
}

fn build_explore(table: &DataTable, target: &str) -> ExploreView {
    let counts = table
        .column(target)
        .map(value_counts)
        .unwrap_or_default();

    let histograms = table
        .numeric_columns()
        .into_iter()
        .filter_map(|name| {
            let values: Vec<f64> = table
                .column(&name)
                .expect("numeric_columns returns existing names")
                .filter_map(|c| c.as_f64())
                .collect();
            histogram(&values).map(|h| (name, h))
        })
        .collect();

    let correlation = correlation_matrix(table);

    ExploreView {
        target: target.to_string(),
        counts,
        histograms,
        correlation,
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub stage: Stage,

    /// File name of the current upload, for summaries.
    pub source_name: Option<String>,

    /// Dataset exactly as parsed (None until the user loads a file).
    pub raw: Option<DataTable>,

    /// Cleaned dataset plus what the cleaning removed.
    pub clean: Option<CleanReport>,

    /// The bundled classifiers; None when their artifacts failed to load,
    /// which disables the inference stage.
    pub models: Option<ModelSet>,

    /// Frequency-chart column chosen by the user when the default target
    /// column is absent.
    pub target_override: Option<String>,

    /// Cached exploratory charts for the current table and target.
    pub explore: Option<ExploreView>,

    /// Cached inference outcome (or the error it ended with).
    pub inference: Option<Result<InferenceOutcome, InferError>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let (models, status_message) = match ModelSet::load(Path::new("models")) {
            Ok(set) => (Some(set), None),
            Err(e) => {
                log::error!("Failed to load model artifacts: {e}");
                (None, Some(format!("Error: {e}")))
            }
        };
        Self {
            stage: Stage::default(),
            source_name: None,
            raw: None,
            clean: None,
            models,
            target_override: None,
            explore: None,
            inference: None,
            status_message,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table: clean it and reset every derived cache.
    pub fn set_table(&mut self, source_name: String, raw: DataTable) {
        let report = clean_table(&raw);
        log::info!(
            "Cleaned '{}': {} of {} rows kept, dropped columns {:?}",
            source_name,
            report.table.n_rows(),
            raw.n_rows(),
            report.dropped_columns
        );

        self.raw = Some(raw);
        self.clean = Some(report);
        self.source_name = Some(source_name);
        self.target_override = None;
        self.explore = None;
        self.inference = None;
        self.status_message = None;
    }

    /// The cleaned table, if a dataset has been loaded.
    pub fn clean_table(&self) -> Option<&DataTable> {
        self.clean.as_ref().map(|r| &r.table)
    }

    /// Column the frequency chart should use: the default target when
    /// present, otherwise the user's pick, otherwise the first column.
    pub fn explore_target(&self) -> Option<String> {
        let table = self.clean_table()?;
        if table.has_column(TARGET_COLUMN) {
            return Some(TARGET_COLUMN.to_string());
        }
        self.target_override
            .clone()
            .filter(|c| table.has_column(c))
            .or_else(|| table.columns().first().cloned())
    }

    /// Pick the frequency-chart column (only meaningful when the default
    /// target is absent). The cache refreshes on the next frame.
    pub fn set_target(&mut self, column: String) {
        self.target_override = Some(column);
    }

    /// Rebuild the exploratory cache if the table or target changed.
    pub fn ensure_explore(&mut self) {
        let Some(target) = self.explore_target() else {
            self.explore = None;
            return;
        };
        if matches!(&self.explore, Some(v) if v.target == target) {
            return;
        }
        if let Some(report) = &self.clean {
            self.explore = Some(build_explore(&report.table, &target));
        }
    }

    /// Run the models once per table; later frames reuse the outcome.
    pub fn ensure_inference(&mut self) {
        if self.inference.is_some() {
            return;
        }
        let (Some(report), Some(models)) = (&self.clean, &self.models) else {
            return;
        };
        let outcome = infer::run_inference(&report.table, models);
        match &outcome {
            Ok(result) => log::info!(
                "Classified {} rows with {} models",
                result.results.n_rows(),
                models.models().len()
            ),
            Err(e) => log::warn!("Inference failed: {e}"),
        }
        self.inference = Some(outcome);
    }
}
