use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::DataTable;

// ---------------------------------------------------------------------------
// Table preview widget
// ---------------------------------------------------------------------------

/// Render the first `max_rows` rows of a table as a striped grid with a
/// header. Page scrolling is left to the surrounding panel.
pub fn preview(ui: &mut Ui, id_salt: &str, table: &DataTable, max_rows: usize) {
    let head = table.head(max_rows);

    ui.push_id(id_salt, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().resizable(true), table.n_cols())
            .header(20.0, |mut header| {
                for name in table.columns() {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, head.len(), |mut row| {
                    let cells = &head[row.index()];
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell.display_compact());
                        });
                    }
                });
            });
    });

    if table.n_rows() > max_rows {
        ui.small(format!(
            "Showing the first {} of {} rows",
            max_rows,
            table.n_rows()
        ));
    }
}
