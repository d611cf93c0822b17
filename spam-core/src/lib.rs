//! SMS spam classification core
//!
//! Normalizes a raw message into stems, vectorizes it with a fitted TF-IDF
//! vectorizer and maps the fitted classifier's prediction onto a [`Label`].
//!
//! ```no_run
//! use spam_core::{Artifacts, SpamClassifier, TextNormalizer};
//! use std::path::Path;
//!
//! # fn main() -> spam_core::Result<()> {
//! let artifacts = Artifacts::load(
//!     Path::new("models/vectorizer.json"),
//!     Path::new("models/classifier.json"),
//! )?;
//! let classifier = SpamClassifier::from_artifacts(TextNormalizer::english(), artifacts);
//! let verdict = classifier.check("WIN a FREE iPhone now!")?;
//! println!("{}", verdict.label);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod inference;
pub mod pipeline;
pub mod text;

pub use error::{ClassifierError, Result};
pub use inference::{Artifacts, FeatureVector, Label, SpamInference};
pub use pipeline::{SpamClassifier, Verdict};
pub use text::{StemmerKind, StopwordSet, TextNormalizer};
