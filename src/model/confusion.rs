use super::ModelError;

// ---------------------------------------------------------------------------
// Two-class confusion matrix
// ---------------------------------------------------------------------------

/// Counts of actual vs. predicted class, `counts[actual][predicted]`.
/// Row and column 0 are the negative class, 1 the positive class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    /// Tally paired label vectors. Both must have the same length and only
    /// contain the two class ids.
    pub fn from_pairs(actual: &[i64], predicted: &[i64]) -> Result<Self, ModelError> {
        if actual.len() != predicted.len() {
            return Err(ModelError::LengthMismatch {
                actual: actual.len(),
                predicted: predicted.len(),
            });
        }
        let mut counts = [[0usize; 2]; 2];
        for (&a, &p) in actual.iter().zip(predicted) {
            let ai = class_index(a)?;
            let pi = class_index(p)?;
            counts[ai][pi] += 1;
        }
        Ok(ConfusionMatrix { counts })
    }

    pub fn count(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual][predicted]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Share of samples on the diagonal; `None` for an empty matrix.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some((self.counts[0][0] + self.counts[1][1]) as f64 / total as f64)
    }
}

fn class_index(id: i64) -> Result<usize, ModelError> {
    match id {
        0 => Ok(0),
        1 => Ok(1),
        other => Err(ModelError::ClassRange(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_land_where_expected() {
        // actual:    0 0 1 1 1
        // predicted: 0 1 1 1 0
        let m = ConfusionMatrix::from_pairs(&[0, 0, 1, 1, 1], &[0, 1, 1, 1, 0]).unwrap();
        assert_eq!(m.count(0, 0), 1);
        assert_eq!(m.count(0, 1), 1);
        assert_eq!(m.count(1, 0), 1);
        assert_eq!(m.count(1, 1), 2);
        assert_eq!(m.total(), 5);
    }

    #[test]
    fn accuracy_is_the_diagonal_share() {
        let m = ConfusionMatrix::from_pairs(&[0, 0, 1, 1], &[0, 1, 1, 1]).unwrap();
        assert!((m.accuracy().unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn empty_inputs_give_an_empty_matrix() {
        let m = ConfusionMatrix::from_pairs(&[], &[]).unwrap();
        assert_eq!(m.total(), 0);
        assert_eq!(m.accuracy(), None);
    }

    #[test]
    fn mismatched_lengths_and_stray_ids_are_errors() {
        assert!(matches!(
            ConfusionMatrix::from_pairs(&[0], &[]),
            Err(ModelError::LengthMismatch { .. })
        ));
        assert!(matches!(
            ConfusionMatrix::from_pairs(&[2], &[0]),
            Err(ModelError::ClassRange(2))
        ));
    }
}
