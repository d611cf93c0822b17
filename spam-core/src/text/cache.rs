//! Memoization of normalized messages
//!
//! Keyed by the exact raw input. Entries live for the whole process; there is no
//! eviction, which is fine for an interactive single-page tool.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Append-only concurrent map from raw message to normalized message
#[derive(Debug, Default)]
pub struct NormalizationCache {
    entries: RwLock<HashMap<String, String>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl NormalizationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs outside the lock. When two callers race on the same new key
    /// the first insert wins; both computed the same pure result anyway.
    pub fn get_or_insert_with<F>(&self, key: &str, compute: F) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(value) = self.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return value;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute();

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(key.to_string())
            .or_insert(value)
            .clone()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
