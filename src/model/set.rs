use std::fmt;
use std::path::Path;

use super::{Classifier, ForestModel, LabelCodec, ModelError, SvcModel};

// ---------------------------------------------------------------------------
// ModelSet – the fixed pair of bundled classifiers
// ---------------------------------------------------------------------------

/// Default artifacts compiled into the binary.
const BUNDLED_FOREST: &str = include_str!("../../models/random_forest.json");
const BUNDLED_SVC: &str = include_str!("../../models/svc.json");

/// Override file names looked up inside the models directory.
pub const FOREST_FILE: &str = "random_forest.json";
pub const SVC_FILE: &str = "svc.json";

/// The classifiers run during inference, in a fixed presentation order
/// (random forest first, then SVC), plus the label codec they share.
pub struct ModelSet {
    codec: LabelCodec,
    models: Vec<Box<dyn Classifier>>,
}

impl ModelSet {
    /// Assemble a set, checking that every model agrees on the feature count.
    pub fn new(codec: LabelCodec, models: Vec<Box<dyn Classifier>>) -> Result<Self, ModelError> {
        let first = models
            .first()
            .ok_or_else(|| ModelError::InvalidArtifact("model set is empty".into()))?;
        let expected = first.n_features();
        for model in &models {
            if model.n_features() != expected {
                return Err(ModelError::InvalidArtifact(format!(
                    "'{}' expects {} features but '{}' expects {}",
                    first.name(),
                    expected,
                    model.name(),
                    model.n_features()
                )));
            }
        }
        Ok(ModelSet { codec, models })
    }

    /// The artifacts compiled into the binary.
    pub fn bundled() -> Result<Self, ModelError> {
        let forest = parse_forest(BUNDLED_FOREST, "bundled random forest")?;
        let svc = parse_svc(BUNDLED_SVC, "bundled SVC")?;
        Self::new(
            LabelCodec::binary_quality(),
            vec![Box::new(forest), Box::new(svc)],
        )
    }

    /// Bundled artifacts with per-file overrides from `dir`. A file that
    /// exists but cannot be read or parsed is an error, never a silent
    /// fallback to the bundled copy.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let forest = match read_override(dir, FOREST_FILE)? {
            Some(source) => parse_forest(&source, FOREST_FILE)?,
            None => parse_forest(BUNDLED_FOREST, "bundled random forest")?,
        };
        let svc = match read_override(dir, SVC_FILE)? {
            Some(source) => parse_svc(&source, SVC_FILE)?,
            None => parse_svc(BUNDLED_SVC, "bundled SVC")?,
        };
        Self::new(
            LabelCodec::binary_quality(),
            vec![Box::new(forest), Box::new(svc)],
        )
    }

    pub fn codec(&self) -> &LabelCodec {
        &self.codec
    }

    pub fn models(&self) -> &[Box<dyn Classifier>] {
        &self.models
    }

    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name()).collect()
    }

    pub fn n_features(&self) -> usize {
        self.models[0].n_features()
    }
}

// Classifier boxes carry no Debug of their own; show the set by name.
impl fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSet")
            .field("classes", &self.codec.classes())
            .field("models", &self.names())
            .finish()
    }
}

fn parse_forest(source: &str, artifact: &str) -> Result<ForestModel, ModelError> {
    ForestModel::from_json(source).map_err(|source| ModelError::Artifact {
        artifact: artifact.to_string(),
        source: Box::new(source),
    })
}

fn parse_svc(source: &str, artifact: &str) -> Result<SvcModel, ModelError> {
    SvcModel::from_json(source).map_err(|source| ModelError::Artifact {
        artifact: artifact.to_string(),
        source: Box::new(source),
    })
}

fn read_override(dir: &Path, file: &str) -> Result<Option<String>, ModelError> {
    let path = dir.join(file);
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(&path)
        .map(Some)
        .map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    #[test]
    fn bundled_artifacts_parse_and_keep_their_order() {
        let set = ModelSet::bundled().unwrap();
        assert_eq!(set.names(), vec!["Random Forest", "SVC"]);
        assert_eq!(set.n_features(), 4);
        assert_eq!(set.codec().classes(), &["bad".to_string(), "good".to_string()]);
    }

    #[test]
    fn debug_format_lists_the_model_names() {
        let set = ModelSet::bundled().unwrap();
        let rendered = format!("{set:?}");
        assert!(rendered.contains("Random Forest"), "{rendered}");
        assert!(rendered.contains("SVC"), "{rendered}");
    }

    #[test]
    fn load_without_overrides_matches_bundled() {
        let set = ModelSet::load(Path::new("this-directory-does-not-exist")).unwrap();
        assert_eq!(set.names(), vec!["Random Forest", "SVC"]);
    }

    #[test]
    fn malformed_override_is_an_error_not_a_fallback() {
        let dir = std::env::temp_dir().join(format!("mela-models-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(FOREST_FILE), "{ not json").unwrap();

        let err = ModelSet::load(&dir).unwrap_err();
        assert!(
            matches!(&err, ModelError::Artifact { artifact, .. } if artifact == FOREST_FILE),
            "unexpected error: {err}"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    struct Stub {
        features: usize,
    }

    impl Classifier for Stub {
        fn name(&self) -> &str {
            "stub"
        }
        fn n_features(&self) -> usize {
            self.features
        }
        fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>, ModelError> {
            Ok(Array1::zeros(x.nrows()))
        }
    }

    #[test]
    fn mismatched_feature_counts_are_rejected() {
        let err = ModelSet::new(
            LabelCodec::binary_quality(),
            vec![Box::new(Stub { features: 4 }), Box::new(Stub { features: 3 })],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));
    }
}
