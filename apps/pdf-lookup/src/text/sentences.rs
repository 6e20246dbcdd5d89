//! Sentence segmentation
//!
//! Unicode sentence boundaries (UAX #29) with a per-language abbreviation
//! list, so `Dr. Smith` or `e.g. this` do not end a sentence. The tokenizer
//! is built once at startup and passed to the extractor.

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

const ENGLISH: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "fig", "figs", "vol", "pp",
    "ch", "sec", "approx", "inc", "ltd", "co", "corp", "dept", "est", "gen", "col", "lt",
    "capt", "rev", "al", "jan", "feb", "apr", "aug", "sep", "sept", "oct", "nov", "dec",
];

const GERMAN: &[&str] = &["bzw", "usw", "ca", "nr", "dr", "prof", "str", "vgl", "ggf", "hr", "fr"];

const FRENCH: &[&str] = &["m", "mme", "mlle", "mm", "dr", "env", "cf", "av", "bd"];

const SPANISH: &[&str] = &["sr", "sra", "srta", "dr", "dra", "ud", "uds", "pág", "av", "aprox"];

/// Splits cleaned page text into sentences
#[derive(Debug, Clone)]
pub struct SentenceTokenizer {
    language: String,
    abbreviations: HashSet<&'static str>,
}

impl SentenceTokenizer {
    /// Build the tokenizer for a language name (`english`, `german`, ...)
    ///
    /// Unknown languages get plain Unicode boundaries with no abbreviation
    /// handling.
    pub fn for_language(language: &str) -> Self {
        let language = language.trim().to_ascii_lowercase();
        let list: &[&'static str] = match language.as_str() {
            "english" | "en" | "eng" => ENGLISH,
            "german" | "de" | "deu" => GERMAN,
            "french" | "fr" | "fra" => FRENCH,
            "spanish" | "es" | "spa" => SPANISH,
            other => {
                tracing::warn!(language = other, "No abbreviation list, using plain sentence boundaries");
                &[]
            }
        };

        Self {
            language,
            abbreviations: list.iter().copied().collect(),
        }
    }

    pub fn english() -> Self {
        Self::for_language("english")
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Split text into trimmed, non-empty sentences
    pub fn sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();

        let mut pieces = text.split_sentence_bounds().peekable();
        while let Some(piece) = pieces.next() {
            current.push_str(piece);
            if self.ends_with_abbreviation(&current, pieces.peek().copied()) {
                continue;
            }
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
        push_trimmed(&mut sentences, &current);

        sentences
    }

    /// Whether `text` stops on an abbreviation rather than a sentence end
    ///
    /// A lone capital letter (`J.`) only counts as an initial when the word
    /// before it or the piece after it is also abbreviated, so `grade A.`
    /// still ends a sentence while `J. R. Tolkien` and `Dr. J. Smith` do not.
    fn ends_with_abbreviation(&self, text: &str, next: Option<&str>) -> bool {
        let Some(stem) = text.trim_end().strip_suffix('.') else {
            return false;
        };

        let mut words = stem.split_whitespace().rev();
        let token = words
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        if token.is_empty() {
            return false;
        }

        let parts: Vec<&str> = token.split('.').collect();
        if parts.iter().all(|part| is_single_letter(part)) {
            // Initialisms: "U.S.", "e.g."
            if parts.len() > 1 {
                return true;
            }
            if token.chars().all(char::is_lowercase) {
                return true;
            }
            let after_abbreviation = words.next().is_some_and(|w| w.ends_with('.'));
            let before_initial = next.is_some_and(starts_with_initial);
            return after_abbreviation || before_initial;
        }

        self.abbreviations.contains(token.to_lowercase().as_str())
    }
}

impl Default for SentenceTokenizer {
    fn default() -> Self {
        Self::english()
    }
}

fn is_single_letter(part: &str) -> bool {
    let mut chars = part.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// `R. Tolkien` style: a single letter followed by a period
fn starts_with_initial(piece: &str) -> bool {
    let mut chars = piece.trim_start().chars();
    matches!((chars.next(), chars.next()), (Some(c), Some('.')) if c.is_alphabetic())
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let sentence = candidate.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}
