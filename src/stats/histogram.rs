// ---------------------------------------------------------------------------
// Histogram binning and a Gaussian KDE overlay
// ---------------------------------------------------------------------------

/// Ceiling for the automatic bin count; a single extreme outlier can push
/// the Freedman–Diaconis estimate past any plottable range.
const MAX_BINS: usize = 512;

/// Equal-width histogram over one numeric column.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Bin edges, `counts.len() + 1` of them, strictly increasing.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub bin_width: f64,
    /// Smoothed density curve scaled to the count axis, if one could be fit.
    pub kde: Option<Vec<[f64; 2]>>,
}

impl Histogram {
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// Center of bin `i`, handy for bar placement.
    pub fn bin_center(&self, i: usize) -> f64 {
        (self.edges[i] + self.edges[i + 1]) / 2.0
    }
}

/// Bin the values with an automatic bin count (the larger of the Sturges and
/// Freedman–Diaconis estimates) and overlay a Gaussian KDE scaled to counts.
/// Returns `None` when there are no values.
pub fn histogram(values: &[f64]) -> Option<Histogram> {
    if values.is_empty() {
        return None;
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // A constant column collapses to a single unit-width bin.
    if max - min == 0.0 {
        return Some(Histogram {
            edges: vec![min - 0.5, min + 0.5],
            counts: vec![values.len()],
            bin_width: 1.0,
            kde: None,
        });
    }

    let n_bins = auto_bin_count(values, min, max);
    let bin_width = (max - min) / n_bins as f64;

    let mut counts = vec![0usize; n_bins];
    for &v in values {
        // The top edge belongs to the last bin.
        let idx = (((v - min) / bin_width) as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    let edges: Vec<f64> = (0..=n_bins).map(|i| min + i as f64 * bin_width).collect();
    let kde = kde_curve(values, bin_width);

    Some(Histogram {
        edges,
        counts,
        bin_width,
        kde,
    })
}

/// max(Sturges, Freedman–Diaconis), clamped to `1..=MAX_BINS`.
fn auto_bin_count(values: &[f64], min: f64, max: f64) -> usize {
    let n = values.len();
    let sturges = (n as f64).log2().ceil() as usize + 1;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let iqr = percentile(&sorted, 75.0) - percentile(&sorted, 25.0);
    let fd = if iqr > 0.0 {
        let width = 2.0 * iqr / (n as f64).cbrt();
        ((max - min) / width).ceil() as usize
    } else {
        0
    };

    sturges.max(fd).clamp(1, MAX_BINS)
}

/// Linear-interpolated percentile of pre-sorted values, `q` in [0, 100].
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = q / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Gaussian KDE with Scott's bandwidth, scaled by `n * bin_width` so the
/// curve rides on the same axis as the bin counts.
fn kde_curve(values: &[f64], bin_width: f64) -> Option<Vec<[f64; 2]>> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = var.sqrt();
    if std == 0.0 {
        return None;
    }

    let bandwidth = std * (n as f64).powf(-0.2);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lo = min - 3.0 * bandwidth;
    let hi = max + 3.0 * bandwidth;

    const RESOLUTION: usize = 200;
    let step = (hi - lo) / (RESOLUTION - 1) as f64;
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let scale = n as f64 * bin_width;

    let curve = (0..RESOLUTION)
        .map(|i| {
            let x = lo + i as f64 * step;
            let density: f64 = values
                .iter()
                .map(|&v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            [x, density * scale]
        })
        .collect();

    Some(curve)
}
