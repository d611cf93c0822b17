//! Normalize-then-classify for one raw message

use serde::Serialize;
use tracing::debug;

use crate::error::{ClassifierError, Result};
use crate::inference::{Artifacts, Label, SpamInference};
use crate::text::{CacheStats, TextNormalizer};

/// Outcome of checking one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub label: Label,
    /// Normalized form that was fed to the vectorizer
    pub normalized: String,
}

impl Verdict {
    pub fn is_spam(&self) -> bool {
        self.label.is_spam()
    }
}

/// Text normalizer plus loaded artifacts, shared across requests
pub struct SpamClassifier {
    normalizer: TextNormalizer,
    inference: SpamInference,
}

impl SpamClassifier {
    pub fn new(normalizer: TextNormalizer, inference: SpamInference) -> Self {
        Self {
            normalizer,
            inference,
        }
    }

    pub fn from_artifacts(normalizer: TextNormalizer, artifacts: Artifacts) -> Self {
        Self::new(normalizer, SpamInference::from_artifacts(artifacts))
    }

    /// Check a raw message.
    ///
    /// Empty or whitespace-only input is rejected with [`ClassifierError::EmptyInput`]
    /// before anything runs. A message that normalizes to an empty string is still
    /// classified.
    pub fn check(&self, raw: &str) -> Result<Verdict> {
        if raw.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let normalized = self.normalizer.normalize(raw);
        let label = self.inference.classify(&normalized)?;

        debug!(
            "Checked message: {} ({} chars normalized)",
            label,
            normalized.len()
        );

        Ok(Verdict { label, normalized })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.normalizer.cache_stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{FeatureVector, MockClassifier, MockVectorizer};
    use std::sync::Arc;

    fn classifier_predicting(raw: i64) -> SpamClassifier {
        let mut vectorizer = MockVectorizer::new();
        vectorizer
            .expect_transform()
            .returning(|docs| Ok(vec![FeatureVector::zeros(1); docs.len()]));
        vectorizer.expect_dimension().return_const(1usize);

        let mut classifier = MockClassifier::new();
        classifier
            .expect_predict()
            .returning(move |rows| Ok(vec![raw; rows.len()]));
        classifier.expect_n_features().return_const(1usize);

        SpamClassifier::new(
            TextNormalizer::english(),
            SpamInference::new(Arc::new(vectorizer), Arc::new(classifier)),
        )
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let mut vectorizer = MockVectorizer::new();
        vectorizer.expect_transform().never();
        vectorizer.expect_dimension().return_const(1usize);
        let mut classifier = MockClassifier::new();
        classifier.expect_predict().never();
        classifier.expect_n_features().return_const(1usize);

        let pipeline = SpamClassifier::new(
            TextNormalizer::english(),
            SpamInference::new(Arc::new(vectorizer), Arc::new(classifier)),
        );

        for raw in ["", "   ", "\n\t  "] {
            assert!(pipeline.check(raw).unwrap_err().is_empty_input());
        }
    }

    #[test]
    fn test_verdict_carries_normalized_text() {
        let pipeline = classifier_predicting(1);
        let verdict = pipeline.check("WIN a FREE prize!!").unwrap();
        assert!(verdict.is_spam());
        assert_eq!(verdict.normalized, "win free prize");
    }

    #[test]
    fn test_stopword_only_message_is_still_classified() {
        let pipeline = classifier_predicting(0);
        let verdict = pipeline.check("the and of").unwrap();
        assert_eq!(verdict.label, Label::NotSpam);
        assert_eq!(verdict.normalized, "");
    }

    #[test]
    fn test_contract_violation_propagates() {
        let pipeline = classifier_predicting(7);
        assert!(matches!(
            pipeline.check("hello there").unwrap_err(),
            ClassifierError::ContractViolation(_)
        ));
    }

    #[test]
    fn test_verdict_serializes() {
        let pipeline = classifier_predicting(0);
        let verdict = pipeline.check("lunch tomorrow").unwrap();
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["label"], "not_spam");
        assert_eq!(json["normalized"], "lunch tomorrow");
    }
}
