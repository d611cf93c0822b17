//! Suffix-stripping stemmers
//!
//! [`PorterStemmer`] reproduces the Porter algorithm with the NLTK extensions, which is
//! what the shipped artifacts were fitted against. [`SnowballStemmer`] wraps the
//! Porter2 implementation from `rust-stemmers` for artifacts fitted with it.

use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reduces a lowercase token to its stem
pub trait Stemmer: Send + Sync {
    /// Stem a single lowercase token
    fn stem(&self, word: &str) -> String;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Stemming algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmerKind {
    /// Porter (1980) with NLTK extensions
    #[default]
    Porter,
    /// Snowball English (Porter2)
    Snowball,
}

impl StemmerKind {
    pub fn build(self) -> Box<dyn Stemmer> {
        match self {
            StemmerKind::Porter => Box::new(PorterStemmer::new()),
            StemmerKind::Snowball => Box::new(SnowballStemmer::new()),
        }
    }
}

impl fmt::Display for StemmerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StemmerKind::Porter => write!(f, "porter"),
            StemmerKind::Snowball => write!(f, "snowball"),
        }
    }
}

impl FromStr for StemmerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "porter" => Ok(StemmerKind::Porter),
            "snowball" | "porter2" => Ok(StemmerKind::Snowball),
            other => Err(format!("unknown stemmer '{}'", other)),
        }
    }
}

/// Snowball English stemmer backed by `rust-stemmers`
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn new() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }

    fn name(&self) -> &str {
        "snowball"
    }
}

/// Irregular forms that bypass the suffix rules
const IRREGULAR_FORMS: &[(&str, &[&str])] = &[
    ("sky", &["sky", "skies"]),
    ("die", &["dying"]),
    ("lie", &["lying"]),
    ("tie", &["tying"]),
    ("news", &["news"]),
    ("inning", &["innings", "inning"]),
    ("outing", &["outings", "outing"]),
    ("canning", &["cannings", "canning"]),
    ("howe", &["howe"]),
    ("proceed", &["proceed"]),
    ("exceed", &["exceed"]),
    ("succeed", &["succeed"]),
];

/// Condition attached to a suffix rule, evaluated on the stem left after removing the suffix
#[derive(Clone, Copy)]
enum Condition {
    Always,
    /// m(stem) > n
    MeasureAbove(usize),
    /// m(stem) > 1 and stem ends in 's' or 't'
    MeasureAboveOneEndingST,
    /// m(stem + first suffix letter) > 0
    MeasureWithSuffixHead,
}

type Rule = (&'static str, &'static str, Condition);

const STEP1A_RULES: &[Rule] = &[
    ("sses", "ss", Condition::Always),
    ("ies", "i", Condition::Always),
    ("ss", "ss", Condition::Always),
    ("s", "", Condition::Always),
];

const STEP2_RULES: &[Rule] = &[
    ("ational", "ate", Condition::MeasureAbove(0)),
    ("tional", "tion", Condition::MeasureAbove(0)),
    ("enci", "ence", Condition::MeasureAbove(0)),
    ("anci", "ance", Condition::MeasureAbove(0)),
    ("izer", "ize", Condition::MeasureAbove(0)),
    ("bli", "ble", Condition::MeasureAbove(0)),
    ("alli", "al", Condition::MeasureAbove(0)),
    ("entli", "ent", Condition::MeasureAbove(0)),
    ("eli", "e", Condition::MeasureAbove(0)),
    ("ousli", "ous", Condition::MeasureAbove(0)),
    ("ization", "ize", Condition::MeasureAbove(0)),
    ("ation", "ate", Condition::MeasureAbove(0)),
    ("ator", "ate", Condition::MeasureAbove(0)),
    ("alism", "al", Condition::MeasureAbove(0)),
    ("iveness", "ive", Condition::MeasureAbove(0)),
    ("fulness", "ful", Condition::MeasureAbove(0)),
    ("ousness", "ous", Condition::MeasureAbove(0)),
    ("aliti", "al", Condition::MeasureAbove(0)),
    ("iviti", "ive", Condition::MeasureAbove(0)),
    ("biliti", "ble", Condition::MeasureAbove(0)),
    ("fulli", "ful", Condition::MeasureAbove(0)),
    ("logi", "log", Condition::MeasureWithSuffixHead),
];

const STEP3_RULES: &[Rule] = &[
    ("icate", "ic", Condition::MeasureAbove(0)),
    ("ative", "", Condition::MeasureAbove(0)),
    ("alize", "al", Condition::MeasureAbove(0)),
    ("iciti", "ic", Condition::MeasureAbove(0)),
    ("ical", "ic", Condition::MeasureAbove(0)),
    ("ful", "", Condition::MeasureAbove(0)),
    ("ness", "", Condition::MeasureAbove(0)),
];

const STEP4_RULES: &[Rule] = &[
    ("al", "", Condition::MeasureAbove(1)),
    ("ance", "", Condition::MeasureAbove(1)),
    ("ence", "", Condition::MeasureAbove(1)),
    ("er", "", Condition::MeasureAbove(1)),
    ("ic", "", Condition::MeasureAbove(1)),
    ("able", "", Condition::MeasureAbove(1)),
    ("ible", "", Condition::MeasureAbove(1)),
    ("ant", "", Condition::MeasureAbove(1)),
    ("ement", "", Condition::MeasureAbove(1)),
    ("ment", "", Condition::MeasureAbove(1)),
    ("ent", "", Condition::MeasureAbove(1)),
    ("ion", "", Condition::MeasureAboveOneEndingST),
    ("ou", "", Condition::MeasureAbove(1)),
    ("ism", "", Condition::MeasureAbove(1)),
    ("ate", "", Condition::MeasureAbove(1)),
    ("iti", "", Condition::MeasureAbove(1)),
    ("ous", "", Condition::MeasureAbove(1)),
    ("ive", "", Condition::MeasureAbove(1)),
    ("ize", "", Condition::MeasureAbove(1)),
];

/// Porter stemmer, NLTK flavour
///
/// Words are handled as `char` sequences so non-ASCII letters count as consonants,
/// matching the reference behaviour on code points.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        Self
    }

    fn stem_chars(&self, word: &str) -> String {
        if let Some(root) = irregular_root(word) {
            return root.to_string();
        }

        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= 2 {
            return word.to_string();
        }

        let stem = step1a(chars);
        let stem = step1b(stem);
        let stem = step1c(stem);
        let stem = step2(stem);
        let stem = step3(stem);
        let stem = step4(stem);
        let stem = step5a(stem);
        let stem = step5b(stem);

        stem.into_iter().collect()
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        self.stem_chars(&word.to_lowercase())
    }

    fn name(&self) -> &str {
        "porter"
    }
}

fn irregular_root(word: &str) -> Option<&'static str> {
    IRREGULAR_FORMS
        .iter()
        .find(|(_, forms)| forms.contains(&word))
        .map(|(root, _)| *root)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(word: &[char], i: usize) -> bool {
    let c = word[i];
    if is_vowel(c) {
        return false;
    }
    if c == 'y' {
        return i == 0 || !is_consonant(word, i - 1);
    }
    true
}

/// Number of vowel-consonant sequences, `m` in [C](VC){m}[V]
fn measure(stem: &[char]) -> usize {
    let mut count = 0;
    let mut previous_vowel = false;
    for i in 0..stem.len() {
        let consonant = is_consonant(stem, i);
        if consonant && previous_vowel {
            count += 1;
        }
        previous_vowel = !consonant;
    }
    count
}

fn contains_vowel(stem: &[char]) -> bool {
    (0..stem.len()).any(|i| !is_consonant(stem, i))
}

fn ends_double_consonant(word: &[char]) -> bool {
    let n = word.len();
    n >= 2 && word[n - 1] == word[n - 2] && is_consonant(word, n - 1)
}

/// *o: stem ends consonant-vowel-consonant, last not w/x/y (or a two-letter vowel-consonant word)
fn ends_cvc(word: &[char]) -> bool {
    let n = word.len();
    let three = n >= 3
        && is_consonant(word, n - 3)
        && !is_consonant(word, n - 2)
        && is_consonant(word, n - 1)
        && !matches!(word[n - 1], 'w' | 'x' | 'y');
    let two = n == 2 && !is_consonant(word, 0) && is_consonant(word, 1);
    three || two
}

fn strip_suffix<'a>(word: &'a [char], suffix: &str) -> Option<&'a [char]> {
    let suffix_len = suffix.chars().count();
    if word.len() < suffix_len {
        return None;
    }
    let (stem, tail) = word.split_at(word.len() - suffix_len);
    if tail.iter().copied().eq(suffix.chars()) {
        Some(stem)
    } else {
        None
    }
}

fn ends_with(word: &[char], suffix: &str) -> bool {
    strip_suffix(word, suffix).is_some()
}

fn join(stem: &[char], replacement: &str) -> Vec<char> {
    stem.iter().copied().chain(replacement.chars()).collect()
}

impl Condition {
    fn holds(self, stem: &[char], suffix: &str) -> bool {
        match self {
            Condition::Always => true,
            Condition::MeasureAbove(n) => measure(stem) > n,
            Condition::MeasureAboveOneEndingST => {
                measure(stem) > 1 && matches!(stem.last().copied(), Some('s' | 't'))
            }
            Condition::MeasureWithSuffixHead => {
                let head: Vec<char> = stem.iter().copied().chain(suffix.chars().take(1)).collect();
                measure(&head) > 0
            }
        }
    }
}

/// First rule whose suffix matches decides; a failed condition stops the list.
fn apply_rules(word: Vec<char>, rules: &[Rule]) -> Vec<char> {
    for &(suffix, replacement, condition) in rules {
        if let Some(stem) = strip_suffix(&word, suffix) {
            if condition.holds(stem, suffix) {
                return join(stem, replacement);
            }
            return word;
        }
    }
    word
}

fn step1a(word: Vec<char>) -> Vec<char> {
    if word.len() == 4 {
        if let Some(stem) = strip_suffix(&word, "ies") {
            return join(stem, "ie");
        }
    }
    apply_rules(word, STEP1A_RULES)
}

fn step1b(word: Vec<char>) -> Vec<char> {
    if let Some(stem) = strip_suffix(&word, "ied") {
        let replacement = if word.len() == 4 { "ie" } else { "i" };
        return join(stem, replacement);
    }

    if let Some(stem) = strip_suffix(&word, "eed") {
        if measure(stem) > 0 {
            return join(stem, "ee");
        }
        return word;
    }

    let intermediate: Option<Vec<char>> = ["ed", "ing"]
        .iter()
        .filter_map(|suffix| strip_suffix(&word, suffix))
        .find(|stem| contains_vowel(stem))
        .map(|stem| stem.to_vec());
    let Some(intermediate) = intermediate else {
        return word;
    };

    for (suffix, replacement) in [("at", "ate"), ("bl", "ble"), ("iz", "ize")] {
        if let Some(stem) = strip_suffix(&intermediate, suffix) {
            return join(stem, replacement);
        }
    }

    if ends_double_consonant(&intermediate) {
        let mut stem = intermediate;
        if !matches!(stem.last().copied(), Some('l' | 's' | 'z')) {
            stem.pop();
        }
        return stem;
    }

    if measure(&intermediate) == 1 && ends_cvc(&intermediate) {
        return join(&intermediate, "e");
    }

    intermediate
}

fn step1c(word: Vec<char>) -> Vec<char> {
    if let Some(stem) = strip_suffix(&word, "y") {
        if stem.len() > 1 && is_consonant(stem, stem.len() - 1) {
            return join(stem, "i");
        }
    }
    word
}

fn step2(word: Vec<char>) -> Vec<char> {
    // ALLI -> AL is tried first and the result re-enters step 2
    if let Some(stem) = strip_suffix(&word, "alli") {
        if measure(stem) > 0 {
            return step2(join(stem, "al"));
        }
    }
    apply_rules(word, STEP2_RULES)
}

fn step3(word: Vec<char>) -> Vec<char> {
    apply_rules(word, STEP3_RULES)
}

fn step4(word: Vec<char>) -> Vec<char> {
    apply_rules(word, STEP4_RULES)
}

fn step5a(word: Vec<char>) -> Vec<char> {
    if let Some(stem) = strip_suffix(&word, "e") {
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            return stem.to_vec();
        }
    }
    word
}

fn step5b(word: Vec<char>) -> Vec<char> {
    if ends_with(&word, "ll") && measure(&word[..word.len() - 1]) > 1 {
        let mut stem = word;
        stem.pop();
        return stem;
    }
    word
}
