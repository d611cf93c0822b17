//! English word tokenizer
//!
//! Splits text into sentences, then applies Treebank-style rules to each sentence:
//! quotes, brackets and most punctuation become separate tokens, the sentence-final
//! period is split off, and clitics are separated (`don't` -> `do n't`,
//! `cannot` -> `can not`). Hyphenated words, internal periods (`u.s.`) and
//! digit-grouped numbers (`1,000`, `3:30`) stay whole.

use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Regex substitution applied to a whole sentence
struct Substitution {
    pattern: Regex,
    replacement: &'static str,
}

impl Substitution {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("tokenizer pattern is valid"),
            replacement,
        }
    }

    fn apply(&self, text: String) -> String {
        self.pattern.replace_all(&text, self.replacement).into_owned()
    }
}

static STARTING_QUOTES: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    vec![
        Substitution::new(r"([«“‘„]|`+)", " ${1} "),
        Substitution::new(r#"^""#, "``"),
        Substitution::new(r"(``)", " ${1} "),
        Substitution::new(r#"([ (\[{<])("|'')"#, "${1} `` "),
    ]
});

/// Opening single quote before a one-letter word that is not a clitic (`'a` -> `' a`)
static OPENING_SINGLE_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(')(\w)\b").expect("tokenizer pattern is valid"));

static PUNCTUATION: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    vec![
        Substitution::new(r#"([^.])(\.)([\])}>"'»”’ ]*)\s*$"#, "${1} ${2} ${3} "),
        Substitution::new(r"([:,])([^\d])", " ${1} ${2}"),
        Substitution::new(r"([:,])$", " ${1} "),
        Substitution::new(r"\.{2,}", " ${0} "),
        Substitution::new(r"[;@#$%&]", " ${0} "),
        Substitution::new(r"[?!]", " ${0} "),
        Substitution::new(r"([^'])' ", "${1} ' "),
        Substitution::new(r"[*]", " ${0} "),
        Substitution::new(r"[\]\[(){}<>]", " ${0} "),
        Substitution::new(r"--", " -- "),
    ]
});

static ENDING_QUOTES: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    vec![
        Substitution::new(r"([»”’])", " ${1} "),
        Substitution::new(r"''", " '' "),
        Substitution::new(r#"""#, " '' "),
        Substitution::new(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
        Substitution::new(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
    ]
});

static CONTRACTIONS: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    vec![
        Substitution::new(r"(?i)\b(can)(not)\b", " ${1} ${2} "),
        Substitution::new(r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
        Substitution::new(r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
        Substitution::new(r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
        Substitution::new(r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
        Substitution::new(r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
        Substitution::new(r"(?i)\b(more)('n)\b", " ${1} ${2} "),
        Substitution::new(r"(?i)\b(wan)(na)(\s)", " ${1} ${2} ${3}"),
        Substitution::new(r"(?i) ('t)(is)\b", " ${1} ${2} "),
        Substitution::new(r"(?i) ('t)(was)\b", " ${1} ${2} "),
    ]
});

/// Abbreviations whose trailing period does not end a sentence
const ABBREVIATIONS: &[&str] = &[
    "a.m", "p.m", "e.g", "i.e", "etc", "vs", "viz", "cf", "al", "approx", "mr", "mrs", "ms",
    "dr", "prof", "rev", "hon", "sr", "jr", "st", "mt", "ft", "co", "corp", "inc", "ltd",
    "dept", "univ", "gov", "gen", "col", "lt", "sgt", "capt", "jan", "feb", "mar", "apr",
    "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "mon", "tue", "wed", "thu",
    "fri", "sat", "sun", "no", "nos", "vol", "pp", "u.s", "u.k", "u.n", "d.c", "n.y",
    "l.a", "ave", "blvd", "rd", "est", "min", "max", "tel", "ext",
];

/// Closing punctuation that may trail a sentence terminator
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '»', '”', '’'];

/// Opening punctuation that may lead an abbreviation
const OPENERS: &[char] = &['"', '\'', '(', '[', '{', '«', '“', '‘', '`'];

/// Word tokenizer with language-aware boundaries
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    abbreviations: HashSet<&'static str>,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().copied().collect(),
        }
    }

    /// Tokenize text into word-like units, punctuation included
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.sentences(text)
            .into_iter()
            .flat_map(tokenize_sentence)
            .collect()
    }

    /// Split text into sentence spans
    pub fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        let chunks: Vec<(usize, usize)> = text
            .split_whitespace()
            .map(|chunk| {
                let offset = chunk.as_ptr() as usize - text.as_ptr() as usize;
                (offset, offset + chunk.len())
            })
            .collect();

        for (i, &(chunk_start, chunk_end)) in chunks.iter().enumerate() {
            let next = chunks.get(i + 1).map(|&(s, e)| &text[s..e]);
            if next.is_some() && self.ends_sentence(&text[chunk_start..chunk_end], next) {
                sentences.push(&text[start..chunk_end]);
                start = chunk_end;
            }
        }

        if !text[start..].trim().is_empty() {
            sentences.push(&text[start..]);
        }

        sentences
    }

    fn ends_sentence(&self, chunk: &str, next: Option<&str>) -> bool {
        let core = chunk.trim_end_matches(CLOSERS);

        if core.ends_with("..") {
            return false;
        }
        if core.ends_with('?') || core.ends_with('!') {
            return true;
        }

        let Some(word) = core.strip_suffix('.') else {
            return false;
        };
        let word = word.trim_start_matches(OPENERS);
        if word.is_empty() {
            return true;
        }

        let last_part = word.rsplit('-').next().unwrap_or(word);
        if self.abbreviations.contains(word) || self.abbreviations.contains(last_part) {
            return false;
        }

        // Initials and numbers followed by a word read as part of the same sentence
        let initial = word.chars().count() == 1 && word.chars().all(char::is_alphabetic);
        let number = word.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.');
        let next_is_word = next
            .and_then(|n| n.trim_start_matches(OPENERS).chars().next())
            .is_some_and(char::is_alphabetic);
        if (initial || number) && next_is_word {
            return false;
        }

        true
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn tokenize_sentence(sentence: &str) -> Vec<String> {
    let mut text = sentence.to_string();

    for rule in STARTING_QUOTES.iter() {
        text = rule.apply(text);
    }
    text = OPENING_SINGLE_QUOTE
        .replace_all(&text, |caps: &Captures| {
            let letter = &caps[2];
            if matches!(letter.to_lowercase().as_str(), "m" | "t" | "s" | "d" | "n") {
                caps[0].to_string()
            } else {
                format!("{} {}", &caps[1], letter)
            }
        })
        .into_owned();

    for rule in PUNCTUATION.iter() {
        text = rule.apply(text);
    }

    let mut text = format!(" {} ", text);
    for rule in ENDING_QUOTES.iter().chain(CONTRACTIONS.iter()) {
        text = rule.apply(text);
    }

    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        WordTokenizer::new().tokenize(text)
    }

    #[test]
    fn test_basic_punctuation() {
        assert_eq!(
            tokens("hello, world! how are you?"),
            vec!["hello", ",", "world", "!", "how", "are", "you", "?"]
        );
    }

    #[test]
    fn test_sentence_final_periods_split() {
        assert_eq!(
            tokens("call now. win a prize."),
            vec!["call", "now", ".", "win", "a", "prize", "."]
        );
    }

    #[test]
    fn test_contractions() {
        assert_eq!(tokens("don't"), vec!["do", "n't"]);
        assert_eq!(tokens("it's mine"), vec!["it", "'s", "mine"]);
        assert_eq!(tokens("i'm here"), vec!["i", "'m", "here"]);
        assert_eq!(tokens("we'll see"), vec!["we", "'ll", "see"]);
        assert_eq!(tokens("i cannot"), vec!["i", "can", "not"]);
        assert_eq!(tokens("gonna win"), vec!["gon", "na", "win"]);
        assert_eq!(tokens("wanna go"), vec!["wan", "na", "go"]);
    }

    #[test]
    fn test_words_that_stay_whole() {
        assert_eq!(tokens("e-mail me"), vec!["e-mail", "me"]);
        assert_eq!(tokens("win 1,000 now"), vec!["win", "1,000", "now"]);
        assert_eq!(tokens("at 3:30 today"), vec!["at", "3:30", "today"]);
        assert_eq!(tokens("visit www.example.com today"), vec!["visit", "www.example.com", "today"]);
    }

    #[test]
    fn test_symbols_and_brackets() {
        assert_eq!(
            tokens("(free) $100 & more"),
            vec!["(", "free", ")", "$", "100", "&", "more"]
        );
        assert_eq!(tokens("wait... what"), vec!["wait", "...", "what"]);
        assert_eq!(tokens("yes--no"), vec!["yes", "--", "no"]);
    }

    #[test]
    fn test_quotes() {
        assert_eq!(
            tokens("he said \"hi\" loudly"),
            vec!["he", "said", "``", "hi", "''", "loudly"]
        );
    }

    #[test]
    fn test_abbreviations_do_not_split_sentences() {
        let tokenizer = WordTokenizer::new();
        assert_eq!(tokenizer.sentences("ask mr. smith today"), vec!["ask mr. smith today"]);
        assert_eq!(
            tokenizer.sentences("done. next one"),
            vec!["done.", " next one"]
        );
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \n\t ").is_empty());
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(tokens("café crème 😀"), vec!["café", "crème", "😀"]);
    }
}
