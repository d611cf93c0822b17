//! Integration tests for the normalize-vectorize-predict pipeline

use spam_core::{Artifacts, ClassifierError, Label, SpamClassifier, TextNormalizer};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Helper to build a classifier from the fixture vectorizer and the given classifier file
fn setup_classifier(classifier_file: &str) -> SpamClassifier {
    let artifacts = Artifacts::load(&fixture("vectorizer.json"), &fixture(classifier_file))
        .expect("fixture artifacts load");
    SpamClassifier::from_artifacts(TextNormalizer::english(), artifacts)
}

#[test]
fn test_obvious_spam() {
    let classifier = setup_classifier("classifier.json");

    let verdict = classifier.check("WIN A FREE IPHONE NOW CLICK HERE").unwrap();
    assert_eq!(verdict.label, Label::Spam);
    assert_eq!(verdict.normalized, "win free iphon click");
}

#[test]
fn test_ordinary_message() {
    let classifier = setup_classifier("classifier.json");

    let verdict = classifier
        .check("Let's meet for lunch tomorrow at home")
        .unwrap();
    assert_eq!(verdict.label, Label::NotSpam);
    assert_eq!(verdict.normalized, "let meet lunch tomorrow home");
}

#[test]
fn test_empty_input_is_warning() {
    let classifier = setup_classifier("classifier.json");

    for raw in ["", "    ", "\n"] {
        let err = classifier.check(raw).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyInput));
    }
}

#[test]
fn test_message_normalizing_to_nothing_is_classified() {
    let classifier = setup_classifier("classifier.json");

    // Only stopwords and punctuation; the priors decide
    let verdict = classifier.check("Are you there?!").unwrap();
    assert_eq!(verdict.normalized, "");
    assert_eq!(verdict.label, Label::NotSpam);
}

#[test]
fn test_same_normalization_same_label() {
    let classifier = setup_classifier("classifier.json");

    let pairs = [
        ("FREE prize!", "free, PRIZE"),
        ("Claim your prize now", "claiming prizes"),
        ("meeting a friend", "Meet friends!"),
    ];
    for (a, b) in pairs {
        let first = classifier.check(a).unwrap();
        let second = classifier.check(b).unwrap();
        assert_eq!(first.normalized, second.normalized, "{:?} vs {:?}", a, b);
        assert_eq!(first.label, second.label, "{:?} vs {:?}", a, b);
    }
}

#[test]
fn test_repeated_checks_are_deterministic() {
    let classifier = setup_classifier("classifier.json");

    let first = classifier.check("Call now to claim your free prize").unwrap();
    for _ in 0..10 {
        assert_eq!(classifier.check("Call now to claim your free prize").unwrap(), first);
    }
    assert!(classifier.cache_stats().hits >= 10);
}

#[test]
fn test_unexpected_class_is_contract_violation() {
    let classifier = setup_classifier("classifier_bad_classes.json");

    let err = classifier.check("WIN A FREE IPHONE NOW CLICK HERE").unwrap_err();
    assert!(matches!(err, ClassifierError::ContractViolation(_)));

    // Class 0 still maps cleanly
    let verdict = classifier.check("lunch with a friend tomorrow").unwrap();
    assert_eq!(verdict.label, Label::NotSpam);
}

#[test]
fn test_linear_classifier_artifact() {
    let classifier = setup_classifier("classifier_linear.json");

    assert_eq!(
        classifier.check("Click to claim your FREE prize").unwrap().label,
        Label::Spam
    );
    assert_eq!(
        classifier.check("see you at home for lunch").unwrap().label,
        Label::NotSpam
    );
}

#[test]
fn test_mismatched_artifacts_fail_to_load() {
    let result = Artifacts::load(&fixture("vectorizer.json"), &fixture("classifier_wide.json"));
    assert!(matches!(result, Err(ClassifierError::ArtifactLoad { .. })));
}

#[test]
fn test_missing_artifact_fails_to_load() {
    let result = Artifacts::load(&fixture("vectorizer.json"), &fixture("nope.json"));
    match result {
        Err(ClassifierError::ArtifactLoad { path, .. }) => {
            assert!(path.ends_with("nope.json"));
        }
        _ => panic!("expected ArtifactLoad"),
    }
}
