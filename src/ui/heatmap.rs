use eframe::egui::{self, Align2, Color32, Rect, Sense, TextStyle, Ui, pos2, vec2};
use eframe::epaint::TextShape;

use crate::color::contrast_text;

// ---------------------------------------------------------------------------
// Annotated heatmap, drawn directly with the painter
// ---------------------------------------------------------------------------

/// Fill and annotation for one cell.
pub struct HeatmapCell {
    pub fill: Color32,
    pub label: String,
}

/// Draw a grid of coloured, annotated cells with tick labels on the left and
/// bottom, and optional axis titles (x below, y rotated on the left).
pub fn annotated_heatmap(
    ui: &mut Ui,
    col_labels: &[String],
    row_labels: &[String],
    cell_size: f32,
    axis_titles: Option<(&str, &str)>,
    cell: impl Fn(usize, usize) -> HeatmapCell,
) {
    let n_rows = row_labels.len();
    let n_cols = col_labels.len();
    if n_rows == 0 || n_cols == 0 {
        return;
    }

    let font = TextStyle::Body.resolve(ui.style());
    let text_color = ui.visuals().text_color();

    let row_label_w = ui.fonts(|f| {
        row_labels
            .iter()
            .map(|l| f.layout_no_wrap(l.clone(), font.clone(), text_color).size().x)
            .fold(0.0_f32, f32::max)
    });
    let line_h = ui.fonts(|f| f.row_height(&font));

    let title_gap = if axis_titles.is_some() { line_h + 4.0 } else { 0.0 };
    let left = title_gap + row_label_w + 8.0;
    let grid_w = n_cols as f32 * cell_size;
    let grid_h = n_rows as f32 * cell_size;
    let bottom = line_h + 4.0 + title_gap;

    let (response, painter) =
        ui.allocate_painter(vec2(left + grid_w, grid_h + bottom), Sense::hover());
    let origin = pos2(response.rect.min.x + left, response.rect.min.y);

    // Cells with their annotations.
    for r in 0..n_rows {
        for c in 0..n_cols {
            let HeatmapCell { fill, label } = cell(r, c);
            let rect = Rect::from_min_size(
                pos2(
                    origin.x + c as f32 * cell_size,
                    origin.y + r as f32 * cell_size,
                ),
                vec2(cell_size, cell_size),
            )
            .shrink(0.5);
            painter.rect_filled(rect, egui::CornerRadius::same(2), fill);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                label,
                font.clone(),
                contrast_text(fill),
            );
        }
    }

    // Tick labels: rows on the left, columns underneath.
    for (r, label) in row_labels.iter().enumerate() {
        painter.text(
            pos2(origin.x - 6.0, origin.y + (r as f32 + 0.5) * cell_size),
            Align2::RIGHT_CENTER,
            label,
            font.clone(),
            text_color,
        );
    }
    for (c, label) in col_labels.iter().enumerate() {
        painter.text(
            pos2(origin.x + (c as f32 + 0.5) * cell_size, origin.y + grid_h + 2.0),
            Align2::CENTER_TOP,
            label,
            font.clone(),
            text_color,
        );
    }

    if let Some((x_title, y_title)) = axis_titles {
        painter.text(
            pos2(origin.x + grid_w / 2.0, response.rect.max.y),
            Align2::CENTER_BOTTOM,
            x_title,
            font.clone(),
            text_color,
        );

        let galley = ui.fonts(|f| f.layout_no_wrap(y_title.to_string(), font, text_color));
        let pos = pos2(
            response.rect.min.x,
            origin.y + (grid_h + galley.size().x) / 2.0,
        );
        painter.add(
            TextShape::new(pos, galley, text_color)
                .with_angle(-std::f32::consts::FRAC_PI_2),
        );
    }
}
