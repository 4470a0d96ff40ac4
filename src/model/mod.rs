/// Predict-only classifiers and their serialized artifacts.
///
/// The two bundled models (a random forest and an RBF-kernel SVC) ship as
/// JSON artifacts compiled into the binary; a `models/` directory next to
/// the working directory can override them. Training is out of scope: the
/// structs here only walk trees and evaluate kernels.

use ndarray::{Array1, Array2};
use thiserror::Error;

pub mod confusion;
pub mod forest;
pub mod labels;
pub mod set;
pub mod svm;

pub use confusion::ConfusionMatrix;
pub use forest::ForestModel;
pub use labels::{LabelCodec, LabelError};
pub use set::ModelSet;
pub use svm::SvcModel;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model artifact is invalid: {0}")]
    InvalidArtifact(String),

    #[error("reading model artifact '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("in {artifact}: {source}")]
    Artifact {
        artifact: String,
        #[source]
        source: Box<ModelError>,
    },

    #[error("model '{name}' expects {expected} features, got {actual}")]
    FeatureCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("class id {0} outside the two-class range")]
    ClassRange(i64),

    #[error("have {actual} actual labels but {predicted} predictions")]
    LengthMismatch { actual: usize, predicted: usize },
}

// ---------------------------------------------------------------------------
// Classifier trait
// ---------------------------------------------------------------------------

/// A fitted binary classifier. Rows of `x` are samples, columns features;
/// predictions are class ids decodable through a [`LabelCodec`].
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Number of feature columns the model was trained on.
    fn n_features(&self) -> usize;

    /// Predict one class id per row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>, ModelError>;
}

/// Shared input check used by every implementation.
fn check_feature_count(name: &str, expected: usize, x: &Array2<f64>) -> Result<(), ModelError> {
    if x.ncols() != expected {
        return Err(ModelError::FeatureCount {
            name: name.to_string(),
            expected,
            actual: x.ncols(),
        });
    }
    Ok(())
}
