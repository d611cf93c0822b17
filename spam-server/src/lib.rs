//! spam-server: single-page spam checker
//!
//! Serves an HTML page and a small JSON API on top of [`spam_core`], plus the
//! `spam-check` command line tool.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use api::ApiServer;
pub use config::Config;
pub use error::{Result, ServerError};

use spam_core::{Artifacts, SpamClassifier, StopwordSet, TextNormalizer};
use tracing::info;

use crate::config::TextConfig;

/// Build the text normalizer from configured linguistic resources
pub fn build_normalizer(text: &TextConfig) -> Result<TextNormalizer> {
    let stopwords = match &text.stopwords_path {
        Some(path) => StopwordSet::from_file(path)?,
        None => StopwordSet::english(),
    };

    info!(
        "Text normalizer ready: {} stopwords, {} stemmer",
        stopwords.len(),
        text.stemmer
    );

    Ok(TextNormalizer::new(stopwords, text.stemmer.build()))
}

/// Load everything a classifier needs. Any failure here is fatal at startup.
pub fn build_classifier(config: &Config) -> Result<SpamClassifier> {
    let normalizer = build_normalizer(&config.text)?;
    let artifacts = Artifacts::load(
        &config.artifacts.vectorizer_path,
        &config.artifacts.classifier_path,
    )?;
    Ok(SpamClassifier::from_artifacts(normalizer, artifacts))
}
