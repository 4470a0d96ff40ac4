use thiserror::Error;

// ---------------------------------------------------------------------------
// LabelCodec – validated mapping between class ids and text labels
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum LabelError {
    #[error("unknown label '{label}' (known labels: {known})")]
    UnknownLabel { label: String, known: String },

    #[error("class id {0} has no label")]
    UnknownClass(i64),

    #[error("label codec needs at least two classes")]
    TooFewClasses,

    #[error("duplicate label '{0}'")]
    DuplicateLabel(String),
}

/// Bidirectional class id ↔ label mapping. Index position is the class id,
/// so encode/decode are exact inverses and every lookup is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCodec {
    classes: Vec<String>,
}

impl LabelCodec {
    pub fn new(classes: Vec<String>) -> Result<Self, LabelError> {
        if classes.len() < 2 {
            return Err(LabelError::TooFewClasses);
        }
        for (i, label) in classes.iter().enumerate() {
            if classes[..i].contains(label) {
                return Err(LabelError::DuplicateLabel(label.clone()));
            }
        }
        Ok(LabelCodec { classes })
    }

    /// The apple-quality mapping: 0 → "bad", 1 → "good".
    pub fn binary_quality() -> Self {
        LabelCodec {
            classes: vec!["bad".to_string(), "good".to_string()],
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Text label → class id.
    pub fn encode(&self, label: &str) -> Result<i64, LabelError> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|i| i as i64)
            .ok_or_else(|| LabelError::UnknownLabel {
                label: label.to_string(),
                known: self.classes.join(", "),
            })
    }

    /// Class id → text label.
    pub fn decode(&self, id: i64) -> Result<&str, LabelError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
            .ok_or(LabelError::UnknownClass(id))
    }
}

impl Default for LabelCodec {
    fn default() -> Self {
        Self::binary_quality()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_and_decode_are_inverses() {
        let codec = LabelCodec::binary_quality();
        assert_eq!(codec.encode("bad"), Ok(0));
        assert_eq!(codec.encode("good"), Ok(1));
        assert_eq!(codec.decode(0), Ok("bad"));
        assert_eq!(codec.decode(1), Ok("good"));
    }

    #[test]
    fn unknown_label_reports_known_set() {
        let codec = LabelCodec::binary_quality();
        let err = codec.encode("mediocre").unwrap_err();
        assert_eq!(
            err,
            LabelError::UnknownLabel {
                label: "mediocre".into(),
                known: "bad, good".into(),
            }
        );
    }

    #[test]
    fn out_of_range_ids_are_rejected() {
        let codec = LabelCodec::binary_quality();
        assert_eq!(codec.decode(2), Err(LabelError::UnknownClass(2)));
        assert_eq!(codec.decode(-1), Err(LabelError::UnknownClass(-1)));
    }

    #[test]
    fn construction_validates_classes() {
        assert_eq!(
            LabelCodec::new(vec!["only".into()]),
            Err(LabelError::TooFewClasses)
        );
        assert_eq!(
            LabelCodec::new(vec!["a".into(), "a".into()]),
            Err(LabelError::DuplicateLabel("a".into()))
        );
    }
}
