//! Loading fitted artifacts from disk

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::model::ClassifierArtifact;
use super::tfidf::{TfidfParams, TfidfVectorizer};
use super::{Classifier, Vectorizer};
use crate::error::{ClassifierError, Result};

/// Serialized vectorizer, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VectorizerArtifact {
    Tfidf(TfidfParams),
}

/// A vectorizer/classifier pair ready for inference
#[derive(Clone)]
pub struct Artifacts {
    pub vectorizer: Arc<dyn Vectorizer>,
    pub classifier: Arc<dyn Classifier>,
}

impl Artifacts {
    /// Read both artifacts and check that they agree on the feature dimension.
    ///
    /// Any failure (missing file, malformed JSON, inconsistent shapes) is reported as
    /// [`ClassifierError::ArtifactLoad`] naming the offending path.
    pub fn load(vectorizer_path: &Path, classifier_path: &Path) -> Result<Self> {
        let vectorizer = load_vectorizer(vectorizer_path)?;
        let classifier = load_classifier(classifier_path)?;

        if vectorizer.dimension() != classifier.n_features() {
            return Err(ClassifierError::artifact_load(
                classifier_path,
                format!(
                    "classifier expects {} features but vectorizer produces {}",
                    classifier.n_features(),
                    vectorizer.dimension()
                ),
            ));
        }

        info!(
            "Loaded artifacts: {} features from {}, classifier from {}",
            vectorizer.dimension(),
            vectorizer_path.display(),
            classifier_path.display()
        );

        Ok(Self {
            vectorizer,
            classifier,
        })
    }
}

fn read_json<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = std::fs::read_to_string(path)
        .map_err(|e| ClassifierError::artifact_load(path, e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| ClassifierError::artifact_load(path, e.to_string()))
}

fn load_vectorizer(path: &Path) -> Result<Arc<dyn Vectorizer>> {
    match read_json::<VectorizerArtifact>(path)? {
        VectorizerArtifact::Tfidf(params) => {
            let vectorizer = TfidfVectorizer::from_params(params)
                .map_err(|reason| ClassifierError::artifact_load(path, reason))?;
            Ok(Arc::new(vectorizer))
        }
    }
}

fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>> {
    let artifact: ClassifierArtifact = read_json(path)?;
    artifact
        .validate()
        .map_err(|reason| ClassifierError::artifact_load(path, reason))?;
    Ok(Arc::from(artifact.into_classifier()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VECTORIZER: &str = r#"{
        "kind": "tfidf",
        "vocabulary": { "free": 0, "lunch": 1 },
        "idf": [1.2, 1.8]
    }"#;

    const CLASSIFIER: &str = r#"{
        "kind": "multinomial_nb",
        "classes": [0, 1],
        "class_log_prior": [-0.2, -1.7],
        "feature_log_prob": [[-2.0, -0.2], [-0.2, -2.0]]
    }"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_pair() {
        let dir = TempDir::new().unwrap();
        let v = write(&dir, "vectorizer.json", VECTORIZER);
        let c = write(&dir, "classifier.json", CLASSIFIER);

        let artifacts = Artifacts::load(&v, &c).unwrap();
        assert_eq!(artifacts.vectorizer.dimension(), 2);
        assert_eq!(artifacts.classifier.n_features(), 2);
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let v = dir.path().join("missing.json");
        let c = write(&dir, "classifier.json", CLASSIFIER);

        match Artifacts::load(&v, &c) {
            Err(ClassifierError::ArtifactLoad { path, .. }) => assert_eq!(path, v),
            other => panic!("expected ArtifactLoad, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        let v = write(&dir, "vectorizer.json", VECTORIZER);
        let c = write(&dir, "classifier.json", "{ not json");

        let err = Artifacts::load(&v, &c).err().unwrap();
        assert!(matches!(err, ClassifierError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_inconsistent_shapes() {
        let dir = TempDir::new().unwrap();
        let v = write(
            &dir,
            "vectorizer.json",
            r#"{ "kind": "tfidf", "vocabulary": { "free": 0 }, "idf": [1.0, 2.0] }"#,
        );
        let c = write(&dir, "classifier.json", CLASSIFIER);
        assert!(matches!(
            Artifacts::load(&v, &c).err().unwrap(),
            ClassifierError::ArtifactLoad { .. }
        ));
    }

    #[test]
    fn test_dimension_mismatch_between_artifacts() {
        let dir = TempDir::new().unwrap();
        let v = write(
            &dir,
            "vectorizer.json",
            r#"{ "kind": "tfidf", "vocabulary": { "free": 0 }, "idf": [1.0] }"#,
        );
        let c = write(&dir, "classifier.json", CLASSIFIER);

        match Artifacts::load(&v, &c) {
            Err(ClassifierError::ArtifactLoad { path, reason }) => {
                assert_eq!(path, c);
                assert!(reason.contains("features"));
            }
            other => panic!("expected ArtifactLoad, got {:?}", other.err()),
        }
    }
}
