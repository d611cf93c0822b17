//! Input and output handling for `spam-check`

use spam_core::{ClassifierError, SpamClassifier};
use std::io::{Read, Write};

use crate::error::Result;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_EMPTY_INPUT: u8 = 2;

pub const EMPTY_INPUT_WARNING: &str = "Please enter a message to analyze.";

/// The message given on the command line, otherwise everything readable from `input`.
///
/// Bytes that are not valid UTF-8 cannot be tokenized and are rejected.
pub fn read_message<R: Read>(arg: Option<String>, mut input: R) -> Result<String> {
    if let Some(message) = arg {
        return Ok(message);
    }

    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| {
        ClassifierError::Tokenization(format!("input is not valid UTF-8: {}", e)).into()
    })
}

/// Check `message`, print the verdict to `out` (or the warning to `err`) and return the
/// process exit code. Internal failures are returned as errors.
pub fn check_message<O: Write, E: Write>(
    classifier: &SpamClassifier,
    message: &str,
    show_normalized: bool,
    out: &mut O,
    err: &mut E,
) -> Result<u8> {
    match classifier.check(message) {
        Ok(verdict) => {
            if verdict.is_spam() {
                writeln!(out, "🚩 This message is Spam!")?;
            } else {
                writeln!(out, "✅ This message is Not Spam.")?;
            }
            if show_normalized {
                writeln!(out, "normalized: {}", verdict.normalized)?;
            }
            Ok(EXIT_SUCCESS)
        }
        Err(ClassifierError::EmptyInput) => {
            writeln!(err, "{}", EMPTY_INPUT_WARNING)?;
            Ok(EXIT_EMPTY_INPUT)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServerError;
    use crate::{build_classifier, Config};
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../spam-core/tests/fixtures"))
            .join(name)
    }

    fn setup_classifier(classifier_file: &str) -> SpamClassifier {
        let mut config = Config::default();
        config.artifacts.vectorizer_path = fixture("vectorizer.json");
        config.artifacts.classifier_path = fixture(classifier_file);
        build_classifier(&config).unwrap()
    }

    fn run(classifier: &SpamClassifier, message: &str, show: bool) -> (Result<u8>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = check_message(classifier, message, show, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_argument_wins_over_input() {
        let message = read_message(Some("hello".to_string()), &b"ignored"[..]).unwrap();
        assert_eq!(message, "hello");
    }

    #[test]
    fn test_reads_input_when_no_argument() {
        let message = read_message(None, &b"free prize\n"[..]).unwrap();
        assert_eq!(message, "free prize\n");
    }

    #[test]
    fn test_invalid_utf8_is_tokenization_error() {
        let err = read_message(None, &[0xff, 0xfe, b'f', b'r', b'e', b'e'][..]).unwrap_err();
        assert!(matches!(
            err,
            ServerError::Classifier(ClassifierError::Tokenization(_))
        ));
    }

    #[test]
    fn test_spam_verdict_exits_successfully() {
        let classifier = setup_classifier("classifier.json");

        let (code, out, err) = run(&classifier, "WIN A FREE IPHONE NOW CLICK HERE", true);
        assert_eq!(code.unwrap(), EXIT_SUCCESS);
        assert!(out.contains("This message is Spam!"));
        assert!(out.contains("normalized: win free iphon click"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_not_spam_verdict() {
        let classifier = setup_classifier("classifier.json");

        let (code, out, _) = run(&classifier, "Let's meet for lunch tomorrow", false);
        assert_eq!(code.unwrap(), EXIT_SUCCESS);
        assert!(out.contains("This message is Not Spam."));
        assert!(!out.contains("normalized:"));
    }

    #[test]
    fn test_blank_input_warns_with_exit_code_2() {
        let classifier = setup_classifier("classifier.json");

        for message in ["", "   ", "\n"] {
            let (code, out, err) = run(&classifier, message, false);
            assert_eq!(code.unwrap(), EXIT_EMPTY_INPUT);
            assert!(out.is_empty());
            assert_eq!(err.trim(), EMPTY_INPUT_WARNING);
        }
    }

    #[test]
    fn test_contract_violation_is_an_error() {
        let classifier = setup_classifier("classifier_bad_classes.json");

        let (code, out, _) = run(&classifier, "WIN A FREE IPHONE NOW CLICK HERE", false);
        assert!(matches!(
            code,
            Err(ServerError::Classifier(ClassifierError::ContractViolation(_)))
        ));
        assert!(out.is_empty());
    }
}
