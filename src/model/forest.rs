use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::{Classifier, ModelError, check_feature_count};

// ---------------------------------------------------------------------------
// Decision trees and the majority-vote forest
// ---------------------------------------------------------------------------

/// One node of a fitted decision tree. Left is the `<=` branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        class: i64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn predict_sample(&self, sample: ArrayView1<f64>) -> i64 {
        match self {
            TreeNode::Leaf { class } => *class,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if sample[*feature] <= *threshold {
                    left.predict_sample(sample)
                } else {
                    right.predict_sample(sample)
                }
            }
        }
    }

    /// Every split must reference a feature the model actually has.
    fn validate(&self, n_features: usize) -> Result<(), ModelError> {
        match self {
            TreeNode::Leaf { .. } => Ok(()),
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => {
                if *feature >= n_features {
                    return Err(ModelError::InvalidArtifact(format!(
                        "split references feature {feature} but the model has {n_features}"
                    )));
                }
                left.validate(n_features)?;
                right.validate(n_features)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForestArtifact {
    name: String,
    n_features: usize,
    trees: Vec<TreeNode>,
}

/// A random forest classifier: each tree votes, the majority wins.
/// Vote ties go to the lower class id.
#[derive(Debug, Clone)]
pub struct ForestModel {
    name: String,
    n_features: usize,
    trees: Vec<TreeNode>,
}

impl ForestModel {
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let artifact: ForestArtifact = serde_json::from_str(text)?;
        if artifact.trees.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "forest artifact has no trees".into(),
            ));
        }
        if artifact.n_features == 0 {
            return Err(ModelError::InvalidArtifact(
                "forest artifact declares zero features".into(),
            ));
        }
        for tree in &artifact.trees {
            tree.validate(artifact.n_features)?;
        }
        Ok(ForestModel {
            name: artifact.name,
            n_features: artifact.n_features,
            trees: artifact.trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn vote(&self, sample: ArrayView1<f64>) -> i64 {
        let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.predict_sample(sample)).or_insert(0) += 1;
        }
        votes
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(class, _)| *class)
            .expect("from_json guarantees at least one tree")
    }
}

impl Classifier for ForestModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>, ModelError> {
        check_feature_count(&self.name, self.n_features, x)?;
        Ok(x.rows().into_iter().map(|row| self.vote(row)).collect())
    }
}
