//! Stopword sets
//!
//! The English list is bundled with the crate so normalization never depends on a
//! download step. Alternative lists can be loaded from a one-word-per-line file.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{ClassifierError, Result};

const ENGLISH: &str = include_str!("../../resources/english_stopwords.txt");

/// A fixed set of lowercase stopwords
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The bundled English stopword list (179 words)
    pub fn english() -> Self {
        Self::parse(ENGLISH)
    }

    /// Build a set from explicit words. Words are lowercased on insert.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a stopword file (one word per line, blank lines ignored)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::artifact_load(path, e.to_string()))?;

        let set = Self::parse(&content);
        if set.is_empty() {
            return Err(ClassifierError::artifact_load(path, "stopword list is empty"));
        }

        Ok(set)
    }

    fn parse(content: &str) -> Self {
        Self::from_words(content.lines())
    }

    /// Exact membership test. Callers pass already-lowercased tokens.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
