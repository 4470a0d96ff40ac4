use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Stage};

// ---------------------------------------------------------------------------
// Left side panel – stage navigation
// ---------------------------------------------------------------------------

/// Render the sidebar: app title, stage selector, dataset and model summary.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Apple Quality");
    });
    ui.add_space(4.0);
    ui.separator();

    for stage in Stage::ALL {
        if ui
            .selectable_label(state.stage == stage, stage.label())
            .clicked()
        {
            state.stage = stage;
        }
    }

    ui.separator();

    match (&state.source_name, state.clean_table()) {
        (Some(name), Some(table)) => {
            ui.label(RichText::new(name).strong());
            ui.label(format!(
                "{} rows × {} columns after cleaning",
                table.n_rows(),
                table.n_cols()
            ));
        }
        _ => {
            ui.label("No dataset loaded.");
        }
    }

    ui.separator();
    match &state.models {
        Some(set) => {
            ui.label(format!("Models: {}", set.names().join(", ")));
        }
        None => {
            ui.label(RichText::new("Models unavailable").color(Color32::RED));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(raw), Some(clean)) = (&state.raw, state.clean_table()) {
            ui.label(format!(
                "{} rows loaded, {} after cleaning",
                raw.n_rows(),
                clean.n_rows()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open apple-quality dataset")
        .add_filter("Supported files", &["csv", "xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.n_rows(),
                    table.columns()
                );
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                state.set_table(name, table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
