use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::{Classifier, ModelError, check_feature_count};

// ---------------------------------------------------------------------------
// Support-vector classifier (predict-only, dual form)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    Rbf { gamma: f64 },
}

impl Kernel {
    fn eval(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        match self {
            Kernel::Linear => a.dot(&b),
            Kernel::Rbf { gamma } => {
                let diff = &a - &b;
                (-gamma * diff.dot(&diff)).exp()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SvcArtifact {
    name: String,
    n_features: usize,
    kernel: Kernel,
    support_vectors: Vec<Vec<f64>>,
    /// Dual coefficients, one per support vector, all non-negative.
    alphas: Vec<f64>,
    /// ±1 label per support vector.
    support_labels: Vec<f64>,
    bias: f64,
    /// Class ids reported for a negative / positive decision score.
    classes: [i64; 2],
}

/// Binary SVC in dual form:
/// `score(x) = bias + Σ αⱼ·yⱼ·K(x, svⱼ)`, positive score → `classes[1]`.
#[derive(Debug, Clone)]
pub struct SvcModel {
    name: String,
    n_features: usize,
    kernel: Kernel,
    support_vectors: Array2<f64>,
    alphas: Array1<f64>,
    support_labels: Array1<f64>,
    bias: f64,
    classes: [i64; 2],
}

impl SvcModel {
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let artifact: SvcArtifact = serde_json::from_str(text)?;

        let n_sv = artifact.support_vectors.len();
        if n_sv == 0 {
            return Err(ModelError::InvalidArtifact(
                "SVC artifact has no support vectors".into(),
            ));
        }
        if artifact.alphas.len() != n_sv || artifact.support_labels.len() != n_sv {
            return Err(ModelError::InvalidArtifact(format!(
                "SVC artifact has {n_sv} support vectors but {} alphas and {} labels",
                artifact.alphas.len(),
                artifact.support_labels.len()
            )));
        }
        if artifact
            .support_vectors
            .iter()
            .any(|sv| sv.len() != artifact.n_features)
        {
            return Err(ModelError::InvalidArtifact(
                "support vector length does not match n_features".into(),
            ));
        }
        if artifact.support_labels.iter().any(|&y| y != 1.0 && y != -1.0) {
            return Err(ModelError::InvalidArtifact(
                "support labels must be +1 or -1".into(),
            ));
        }
        if let Kernel::Rbf { gamma } = artifact.kernel {
            if !gamma.is_finite() || gamma <= 0.0 {
                return Err(ModelError::InvalidArtifact(
                    "RBF gamma must be positive".into(),
                ));
            }
        }
        if artifact.classes[0] == artifact.classes[1] {
            return Err(ModelError::InvalidArtifact(
                "SVC classes must be distinct".into(),
            ));
        }

        let flat: Vec<f64> = artifact.support_vectors.into_iter().flatten().collect();
        let support_vectors = Array2::from_shape_vec((n_sv, artifact.n_features), flat)
            .map_err(|e| ModelError::InvalidArtifact(e.to_string()))?;

        Ok(SvcModel {
            name: artifact.name,
            n_features: artifact.n_features,
            kernel: artifact.kernel,
            support_vectors,
            alphas: Array1::from_vec(artifact.alphas),
            support_labels: Array1::from_vec(artifact.support_labels),
            bias: artifact.bias,
            classes: artifact.classes,
        })
    }

    fn score_sample(&self, sample: ArrayView1<f64>) -> f64 {
        let mut score = self.bias;
        for (j, sv) in self.support_vectors.rows().into_iter().enumerate() {
            score += self.alphas[j] * self.support_labels[j] * self.kernel.eval(sample, sv);
        }
        score
    }

    /// Raw decision scores, one per row of `x`.
    pub fn decision_function(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        check_feature_count(&self.name, self.n_features, x)?;
        Ok(x.rows()
            .into_iter()
            .map(|row| self.score_sample(row))
            .collect())
    }
}

impl Classifier for SvcModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>, ModelError> {
        let scores = self.decision_function(x)?;
        Ok(scores
            .iter()
            .map(|&s| {
                if s >= 0.0 {
                    self.classes[1]
                } else {
                    self.classes[0]
                }
            })
            .collect())
    }
}
