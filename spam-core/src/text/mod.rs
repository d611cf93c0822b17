//! Text normalization
//!
//! Raw message -> lowercase -> word tokens -> alphanumeric tokens -> non-stopwords ->
//! stems -> space-joined string. The result is a pure function of the input and is
//! memoized per exact raw string.

pub mod cache;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use cache::{CacheStats, NormalizationCache};
pub use stemmer::{PorterStemmer, SnowballStemmer, Stemmer, StemmerKind};
pub use stopwords::StopwordSet;
pub use tokenizer::WordTokenizer;

use tracing::trace;

/// Message normalizer with injected linguistic resources
pub struct TextNormalizer {
    tokenizer: WordTokenizer,
    stopwords: StopwordSet,
    stemmer: Box<dyn Stemmer>,
    cache: NormalizationCache,
}

impl TextNormalizer {
    /// Create a normalizer from a stopword set and a stemmer
    pub fn new(stopwords: StopwordSet, stemmer: Box<dyn Stemmer>) -> Self {
        Self {
            tokenizer: WordTokenizer::new(),
            stopwords,
            stemmer,
            cache: NormalizationCache::new(),
        }
    }

    /// Bundled English stopwords with the Porter stemmer
    pub fn english() -> Self {
        Self::new(StopwordSet::english(), Box::new(PorterStemmer::new()))
    }

    /// Normalize a raw message, consulting the cache first
    pub fn normalize(&self, raw: &str) -> String {
        self.cache
            .get_or_insert_with(raw, || self.normalize_uncached(raw))
    }

    /// Normalize without touching the cache
    pub fn normalize_uncached(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();

        let stems: Vec<String> = self
            .tokenizer
            .tokenize(&lowered)
            .into_iter()
            .filter(|token| is_alphanumeric(token))
            .filter(|token| !self.stopwords.contains(token))
            .map(|token| self.stemmer.stem(&token))
            .collect();

        trace!("Normalized {} chars into {} stems", raw.len(), stems.len());
        stems.join(" ")
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn stemmer_name(&self) -> &str {
        self.stemmer.name()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::english()
    }
}

// Spacing combining marks (U+093E and kin) pass here although they are neither letters nor digits
fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}
