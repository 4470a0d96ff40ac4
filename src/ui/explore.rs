use eframe::egui::{self, Color32, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::{categorical_palette, diverging};
use crate::infer::TARGET_COLUMN;
use crate::state::AppState;
use crate::ui::heatmap::{HeatmapCell, annotated_heatmap};

// ---------------------------------------------------------------------------
// Stage 2 – exploratory charts over the cleaned table
// ---------------------------------------------------------------------------

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Exploratory Analysis");

    let Some(table) = state.clean_table() else {
        ui.label("Load a dataset first.");
        return;
    };
    if table.is_empty() {
        ui.colored_label(
            Color32::RED,
            "The cleaned dataset has no rows left to chart.",
        );
        return;
    }
    let has_default_target = table.has_column(TARGET_COLUMN);
    let columns: Vec<String> = table.columns().to_vec();

    state.ensure_explore();
    let Some(view) = &state.explore else {
        return;
    };
    let mut picked: Option<String> = None;

    // Only offer a selector when the usual target column is missing.
    if !has_default_target {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("'{TARGET_COLUMN}' not found – column to chart:"));
            egui::ComboBox::from_id_salt("target_column")
                .selected_text(&view.target)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &columns {
                        if ui.selectable_label(view.target == *col, col).clicked() {
                            picked = Some(col.clone());
                        }
                    }
                });
        });
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Frequency of the target column ----
            ui.strong(format!("'{}' value counts", view.target));
            let palette = categorical_palette(view.counts.len());
            let bars: Vec<Bar> = view
                .counts
                .iter()
                .enumerate()
                .map(|(i, (value, count))| {
                    Bar::new(i as f64, *count as f64)
                        .width(0.6)
                        .name(value.to_string())
                        .fill(palette[i])
                })
                .collect();
            let labels: Vec<String> = view.counts.iter().map(|(v, _)| v.to_string()).collect();

            Plot::new("value_counts")
                .height(220.0)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .x_axis_formatter(move |mark, _range| {
                    let rounded = mark.value.round();
                    if (mark.value - rounded).abs() < 1e-6 && rounded >= 0.0 {
                        labels.get(rounded as usize).cloned().unwrap_or_default()
                    } else {
                        String::new()
                    }
                })
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars));
                });

            // ---- One histogram per numeric column ----
            for (name, hist) in &view.histograms {
                ui.add_space(8.0);
                ui.strong(format!("'{name}' distribution"));

                let bars: Vec<Bar> = hist
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| {
                        Bar::new(hist.bin_center(i), count as f64)
                            .width(hist.bin_width * 0.95)
                            .fill(Color32::from_rgb(94, 139, 196))
                    })
                    .collect();

                Plot::new(format!("hist_{name}"))
                    .height(200.0)
                    .legend(Legend::default())
                    .allow_drag(false)
                    .allow_zoom(false)
                    .allow_scroll(false)
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(BarChart::new(bars).name(name));
                        if let Some(kde) = &hist.kde {
                            plot_ui.line(
                                Line::new(PlotPoints::from(kde.clone()))
                                    .name("KDE")
                                    .color(Color32::from_rgb(214, 96, 77))
                                    .width(2.0),
                            );
                        }
                    });
            }

            // ---- Correlation heatmap over numeric columns ----
            ui.add_space(8.0);
            ui.strong("Correlation matrix");
            match &view.correlation {
                Some(m) => {
                    annotated_heatmap(ui, &m.labels, &m.labels, 52.0, None, |r, c| {
                        let v = m.get(r, c);
                        HeatmapCell {
                            fill: diverging(v),
                            label: if v.is_nan() {
                                "–".to_string()
                            } else {
                                format!("{v:.2}")
                            },
                        }
                    });
                }
                None => {
                    ui.label("No numeric columns to correlate.");
                }
            }
        });

    if let Some(column) = picked {
        state.set_target(column);
        state.ensure_explore();
    }
}
