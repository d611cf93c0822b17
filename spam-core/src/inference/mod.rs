//! Artifact-backed inference
//!
//! A fitted [`Vectorizer`] turns normalized text into feature rows and a fitted
//! [`Classifier`] maps rows to raw class values. [`SpamInference`] composes the two for
//! a single message and maps the raw value onto a [`Label`].

pub mod artifacts;
pub mod model;
pub mod tfidf;

pub use artifacts::Artifacts;
pub use model::{ClassifierArtifact, LinearModel, MultinomialNb};
pub use tfidf::TfidfVectorizer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::{ClassifierError, Result};

/// Sparse feature row of fixed dimensionality
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    dimension: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build a row from `(column, value)` pairs. Columns must be below `dimension`.
    pub fn from_pairs(dimension: usize, mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|(index, _)| *index);
        let (indices, values) = pairs.into_iter().unzip();
        Self {
            dimension,
            indices,
            values,
        }
    }

    /// All-zero row
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Dot product with a dense weight row of the same dimension
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.iter()
            .map(|(index, value)| weights.get(index).copied().unwrap_or(0.0) * value)
            .sum()
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for (index, value) in self.iter() {
            if let Some(slot) = dense.get_mut(index) {
                *slot = value;
            }
        }
        dense
    }
}

/// Binary verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Spam,
    NotSpam,
}

impl Label {
    pub fn is_spam(self) -> bool {
        self == Label::Spam
    }
}

impl TryFrom<i64> for Label {
    type Error = ClassifierError;

    fn try_from(raw: i64) -> Result<Self> {
        match raw {
            1 => Ok(Label::Spam),
            0 => Ok(Label::NotSpam),
            other => Err(ClassifierError::ContractViolation(format!(
                "classifier predicted {}, expected 0 or 1",
                other
            ))),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Spam => write!(f, "spam"),
            Label::NotSpam => write!(f, "not spam"),
        }
    }
}

/// Fitted text vectorizer
#[cfg_attr(test, mockall::automock)]
pub trait Vectorizer: Send + Sync {
    /// Transform a batch of documents into one row per document
    fn transform(&self, documents: &[String]) -> Result<Vec<FeatureVector>>;

    /// Number of columns in every produced row
    fn dimension(&self) -> usize;
}

/// Fitted classifier
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
    /// Predict one raw class value per row
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<i64>>;

    /// Number of features each row must have
    fn n_features(&self) -> usize;
}

/// Vectorize-then-predict for one normalized message
#[derive(Clone)]
pub struct SpamInference {
    vectorizer: Arc<dyn Vectorizer>,
    classifier: Arc<dyn Classifier>,
}

impl SpamInference {
    pub fn new(vectorizer: Arc<dyn Vectorizer>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Build from loaded artifacts
    pub fn from_artifacts(artifacts: Artifacts) -> Self {
        Self::new(artifacts.vectorizer, artifacts.classifier)
    }

    /// Classify a normalized message
    pub fn classify(&self, normalized: &str) -> Result<Label> {
        let rows = self.vectorizer.transform(&[normalized.to_string()])?;
        let row = match rows.as_slice() {
            [row] => row,
            other => {
                return Err(self.violation(format!(
                    "vectorizer returned {} rows for a single message",
                    other.len()
                )))
            }
        };

        let expected = self.classifier.n_features();
        if row.dimension() != expected {
            return Err(self.violation(format!(
                "vectorizer produced {} features, classifier expects {}",
                row.dimension(),
                expected
            )));
        }

        let predictions = self.classifier.predict(std::slice::from_ref(row))?;
        let raw = match predictions.as_slice() {
            [raw] => *raw,
            other => {
                return Err(self.violation(format!(
                    "classifier returned {} predictions for a single row",
                    other.len()
                )))
            }
        };

        let label = Label::try_from(raw).inspect_err(|e| error!("{}", e))?;
        debug!("Predicted {} ({} active features)", label, row.nnz());
        Ok(label)
    }

    fn violation(&self, message: String) -> ClassifierError {
        error!("Artifact contract violation: {}", message);
        ClassifierError::ContractViolation(message)
    }
}
