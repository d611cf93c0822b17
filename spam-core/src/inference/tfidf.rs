//! TF-IDF vectorizer restored from a fitted artifact
//!
//! Term weights follow the usual fitted-vectorizer semantics: analyze with the token
//! pattern, build n-grams, count, optionally binarize or apply `1 + ln(tf)`, multiply by
//! the stored idf and normalize each row.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{FeatureVector, Vectorizer};
use crate::error::Result;

const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Row normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized form of a fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfParams {
    /// Term -> column index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    pub idf: Vec<f64>,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    params: TfidfParams,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Validate parameters and compile the token pattern
    pub fn from_params(params: TfidfParams) -> std::result::Result<Self, String> {
        let dimension = params.idf.len();
        if params.vocabulary.len() != dimension {
            return Err(format!(
                "vocabulary has {} terms but idf has {} entries",
                params.vocabulary.len(),
                dimension
            ));
        }

        let mut seen = vec![false; dimension];
        for (term, &index) in &params.vocabulary {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(format!("column {} is assigned twice", index)),
                None => {
                    return Err(format!(
                        "term '{}' maps to column {} outside 0..{}",
                        term, index, dimension
                    ))
                }
            }
        }

        if let Some(bad) = params.idf.iter().find(|v| !v.is_finite()) {
            return Err(format!("idf contains non-finite value {}", bad));
        }

        let (min_n, max_n) = params.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({}, {})", min_n, max_n));
        }

        let token_pattern = Regex::new(&params.token_pattern)
            .map_err(|e| format!("invalid token_pattern: {}", e))?;

        Ok(Self {
            params,
            token_pattern,
        })
    }

    /// Terms and n-grams produced for one document, in order
    fn analyze(&self, document: &str) -> Vec<String> {
        let text = if self.params.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.params.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|gram| gram.join(" ")));
        }
        terms
    }

    fn transform_one(&self, document: &str) -> FeatureVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(document) {
            if let Some(&index) = self.params.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut pairs: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.params.binary {
                    1.0
                } else if self.params.sublinear_tf {
                    1.0 + tf.ln()
                } else {
                    tf
                };
                (index, tf * self.params.idf[index])
            })
            .collect();

        let norm = match self.params.norm {
            Some(Norm::L2) => pairs.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => pairs.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            for (_, value) in pairs.iter_mut() {
                *value /= norm;
            }
        }

        FeatureVector::from_pairs(self.dimension(), pairs)
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, documents: &[String]) -> Result<Vec<FeatureVector>> {
        Ok(documents.iter().map(|d| self.transform_one(d)).collect())
    }

    fn dimension(&self) -> usize {
        self.params.idf.len()
    }
}
