use eframe::egui::{ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// Stage 1 – load a dataset and show what the cleaning did
// ---------------------------------------------------------------------------

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Load Dataset");
    ui.label("Open a CSV or XLSX export of the apple-quality dataset.");
    ui.add_space(4.0);

    if ui.button("Open file…").clicked() {
        panels::open_file_dialog(state);
    }

    ui.add_space(8.0);
    ui.separator();

    let Some(raw) = &state.raw else {
        ui.label("No dataset loaded yet.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(format!(
                "Raw data: {} rows × {} columns",
                raw.n_rows(),
                raw.n_cols()
            ));
            table::preview(ui, "raw_preview", raw, 10);

            if let Some(report) = &state.clean {
                ui.add_space(8.0);
                ui.strong(format!(
                    "After cleaning: {} rows × {} columns",
                    report.table.n_rows(),
                    report.table.n_cols()
                ));
                if report.dropped_columns.is_empty() {
                    ui.label("No columns removed.");
                } else {
                    ui.label(format!(
                        "Removed columns: {}",
                        report.dropped_columns.join(", ")
                    ));
                }
                ui.label(format!(
                    "Dropped {} rows with missing values.",
                    report.rows_dropped
                ));
                table::preview(ui, "clean_preview", &report.table, 10);
            }
        });
}
