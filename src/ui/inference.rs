use anyhow::Context;
use eframe::egui::{Color32, ScrollArea, Ui};

use crate::color::sequential_blue;
use crate::data::export::table_to_csv_bytes;
use crate::data::model::DataTable;
use crate::state::AppState;
use crate::ui::heatmap::{HeatmapCell, annotated_heatmap};
use crate::ui::table;

// ---------------------------------------------------------------------------
// Stage 3 – run the bundled models and show the results
// ---------------------------------------------------------------------------

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Inference");

    if state.models.is_none() {
        ui.colored_label(
            Color32::RED,
            "Model artifacts failed to load – inference is unavailable.",
        );
        return;
    }
    let Some(table) = state.clean_table() else {
        ui.label("Load a dataset first.");
        return;
    };
    if table.is_empty() {
        ui.colored_label(Color32::RED, "The cleaned dataset has no rows to classify.");
        return;
    }

    state.ensure_inference();

    let class_labels: Vec<String> = state
        .models
        .as_ref()
        .map(|set| set.codec().classes().to_vec())
        .unwrap_or_default();
    let mut new_status: Option<String> = None;

    match &state.inference {
        Some(Ok(outcome)) => {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Predictions");
                    table::preview(ui, "results_preview", &outcome.results, 5);
                    ui.add_space(4.0);

                    if ui.button("Download predictions CSV").clicked() {
                        if let Err(e) = save_results(&outcome.results) {
                            log::error!("Saving predictions failed: {e:#}");
                            new_status = Some(format!("Error: {e:#}"));
                        }
                    }

                    if let Some(matrices) = &outcome.confusion {
                        ui.add_space(12.0);
                        ui.strong("Evaluation against the 'Quality' column");

                        for (name, cm) in matrices {
                            ui.add_space(8.0);
                            ui.label(name);

                            // Shade relative to this matrix's own count range,
                            // flat mid-blue when all four cells are equal.
                            let counts: Vec<usize> = (0..2)
                                .flat_map(|r| (0..2).map(move |c| cm.count(r, c)))
                                .collect();
                            let lo = *counts.iter().min().unwrap() as f64;
                            let hi = *counts.iter().max().unwrap() as f64;

                            annotated_heatmap(
                                ui,
                                &class_labels,
                                &class_labels,
                                64.0,
                                Some(("Predicted", "Actual")),
                                |r, c| {
                                    let count = cm.count(r, c);
                                    let t = if hi > lo {
                                        (count as f64 - lo) / (hi - lo)
                                    } else {
                                        0.5
                                    };
                                    HeatmapCell {
                                        fill: sequential_blue(t),
                                        label: count.to_string(),
                                    }
                                },
                            );

                            if let Some(accuracy) = cm.accuracy() {
                                ui.label(format!(
                                    "Accuracy: {:.1}% over {} rows",
                                    accuracy * 100.0,
                                    cm.total()
                                ));
                            }
                        }
                    }
                });
        }
        Some(Err(e)) => {
            ui.colored_label(Color32::RED, format!("Error: {e}"));
        }
        None => {
            ui.spinner();
        }
    }

    if let Some(msg) = new_status {
        state.status_message = Some(msg);
    }
}

/// Ask for a target path and write the predictions as UTF-8 CSV.
/// Cancelling the dialog is not an error.
fn save_results(results: &DataTable) -> anyhow::Result<()> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save predictions")
        .set_file_name("predizioni.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return Ok(());
    };

    let bytes = table_to_csv_bytes(results)?;
    std::fs::write(&path, bytes).context("writing predictions file")?;
    log::info!("Wrote predictions to {}", path.display());
    Ok(())
}
