//! Fitted classifiers
//!
//! Two artifact kinds are understood: a multinomial naive Bayes model and a linear
//! decision function (logistic regression, linear SVM). Both predict the class whose
//! score is highest and return the raw class value stored in the artifact.

use serde::{Deserialize, Serialize};

use super::{Classifier, FeatureVector};
use crate::error::{ClassifierError, Result};

/// Serialized classifier, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    MultinomialNb(MultinomialNb),
    Linear(LinearModel),
}

impl ClassifierArtifact {
    /// Check internal shapes, returning a human-readable reason on failure
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            ClassifierArtifact::MultinomialNb(model) => model.validate(),
            ClassifierArtifact::Linear(model) => model.validate(),
        }
    }

    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self {
            ClassifierArtifact::MultinomialNb(model) => Box::new(model),
            ClassifierArtifact::Linear(model) => Box::new(model),
        }
    }
}

/// Multinomial naive Bayes with log-space parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    pub classes: Vec<i64>,
    pub class_log_prior: Vec<f64>,
    /// One row of per-feature log probabilities per class
    pub feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        if self.class_log_prior.len() != self.classes.len() {
            return Err(format!(
                "{} classes but {} class priors",
                self.classes.len(),
                self.class_log_prior.len()
            ));
        }
        if self.feature_log_prob.len() != self.classes.len() {
            return Err(format!(
                "{} classes but {} feature rows",
                self.classes.len(),
                self.feature_log_prob.len()
            ));
        }
        let width = self.n_features();
        if self.feature_log_prob.iter().any(|row| row.len() != width) {
            return Err("feature_log_prob rows have different lengths".to_string());
        }
        Ok(())
    }

    /// Joint log likelihood per class for one row
    pub fn joint_log_likelihood(&self, row: &FeatureVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_prob)| prior + row.dot(log_prob))
            .collect()
    }
}

impl Classifier for MultinomialNb {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<i64>> {
        rows.iter()
            .map(|row| {
                check_width(row, self.n_features())?;
                let scores = self.joint_log_likelihood(row);
                Ok(self.classes[argmax(&scores)])
            })
            .collect()
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }
}

/// Linear decision function `coef · x + intercept`
///
/// With two classes `coef` holds a single row and a positive score selects
/// `classes[1]`. With more classes there is one row per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LinearModel {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.classes.len() < 2 {
            return Err(format!(
                "linear model needs at least 2 classes, got {}",
                self.classes.len()
            ));
        }
        let expected_rows = if self.classes.len() == 2 {
            1
        } else {
            self.classes.len()
        };
        if self.coef.len() != expected_rows || self.intercept.len() != expected_rows {
            return Err(format!(
                "expected {} coefficient rows and intercepts, got {} and {}",
                expected_rows,
                self.coef.len(),
                self.intercept.len()
            ));
        }
        let width = self.n_features();
        if self.coef.iter().any(|row| row.len() != width) {
            return Err("coef rows have different lengths".to_string());
        }
        Ok(())
    }

    pub fn decision_function(&self, row: &FeatureVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| row.dot(weights) + bias)
            .collect()
    }
}

impl Classifier for LinearModel {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<i64>> {
        rows.iter()
            .map(|row| {
                check_width(row, self.n_features())?;
                let scores = self.decision_function(row);
                let index = match scores.as_slice() {
                    [score] => usize::from(*score > 0.0),
                    _ => argmax(&scores),
                };
                self.classes.get(index).copied().ok_or_else(|| {
                    ClassifierError::ContractViolation(format!(
                        "decision index {} outside {} classes",
                        index,
                        self.classes.len()
                    ))
                })
            })
            .collect()
    }

    fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }
}

fn check_width(row: &FeatureVector, expected: usize) -> Result<()> {
    if row.dimension() != expected {
        return Err(ClassifierError::ContractViolation(format!(
            "row has {} features, model expects {}",
            row.dimension(),
            expected
        )));
    }
    Ok(())
}

/// Index of the largest score; ties go to the lowest index
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[best] {
            best = i;
        }
    }
    best
}
