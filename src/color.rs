use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Chart colors: categorical palette and heatmap ramps
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Used for the bars of the frequency chart.
pub fn categorical_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            to_color32(hsl.into_color())
        })
        .collect()
}

/// Blue → white → red ramp for correlation values in [-1, 1].
/// Undefined (NaN) input maps to a neutral grey.
pub fn diverging(t: f64) -> Color32 {
    if t.is_nan() {
        return Color32::from_gray(90);
    }
    let t = t.clamp(-1.0, 1.0) as f32;

    let cold: LinSrgb = Srgb::new(0.23_f32, 0.30, 0.75).into_linear();
    let warm: LinSrgb = Srgb::new(0.71_f32, 0.02, 0.15).into_linear();
    let mid: LinSrgb = Srgb::new(0.87_f32, 0.87, 0.87).into_linear();

    let rgb = if t < 0.0 {
        cold.mix(mid, 1.0 + t)
    } else {
        mid.mix(warm, t)
    };
    to_color32(Srgb::from_linear(rgb))
}

/// Light → dark blue ramp for counts in [0, 1]. Used by the confusion
/// matrix heatmaps.
pub fn sequential_blue(t: f64) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
    let light: LinSrgb = Srgb::new(0.94_f32, 0.95, 1.00).into_linear();
    let dark: LinSrgb = Srgb::new(0.03_f32, 0.19, 0.42).into_linear();
    to_color32(Srgb::from_linear(light.mix(dark, t)))
}

/// Black or white, whichever reads best on the given fill.
pub fn contrast_text(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luminance = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luminance > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_entries() {
        let palette = categorical_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn diverging_endpoints_lean_the_right_way() {
        let cold = diverging(-1.0);
        let warm = diverging(1.0);
        assert!(cold.b() > cold.r());
        assert!(warm.r() > warm.b());

        // Center of the ramp is light, for dark annotation text.
        assert_eq!(contrast_text(diverging(0.0)), Color32::BLACK);
    }

    #[test]
    fn sequential_ramp_darkens() {
        let lo = sequential_blue(0.0);
        let hi = sequential_blue(1.0);
        assert!(lo.r() > hi.r());
        assert_eq!(contrast_text(lo), Color32::BLACK);
        assert_eq!(contrast_text(hi), Color32::WHITE);
    }

    #[test]
    fn nan_correlation_gets_a_neutral_fill() {
        assert_eq!(diverging(f64::NAN), Color32::from_gray(90));
    }
}
