//! Case-insensitive keyword search over sentence records

use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;

use crate::document::SentenceRecord;

/// A matching sentence with every keyword occurrence wrapped in markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub page: u32,
    pub sentence: String,
}

/// Opening and closing markers placed around each match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub open: String,
    pub close: String,
}

impl Highlight {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Bold red on ANSI terminals
    pub fn ansi() -> Self {
        Self::new("\x1b[1;31m", "\x1b[0m")
    }

    /// `[HL]` and `[/HL]`, for pipes and `--no-color`
    pub fn brackets() -> Self {
        Self::new("[HL]", "[/HL]")
    }
}

impl Default for Highlight {
    fn default() -> Self {
        Self::brackets()
    }
}

/// A compiled keyword
///
/// The keyword is matched literally; regex metacharacters in it have no
/// special meaning. An empty keyword matches nothing.
#[derive(Debug, Clone)]
pub struct KeywordSearch {
    pattern: Option<Regex>,
    highlight: Highlight,
}

impl KeywordSearch {
    pub fn new(keyword: &str, highlight: Highlight) -> Result<Self, regex::Error> {
        let pattern = if keyword.is_empty() {
            None
        } else {
            Some(
                RegexBuilder::new(&regex::escape(keyword))
                    .case_insensitive(true)
                    .build()?,
            )
        };

        Ok(Self { pattern, highlight })
    }

    /// The sentence with matches wrapped, or `None` if it doesn't match
    pub fn highlight(&self, sentence: &str) -> Option<String> {
        let pattern = self.pattern.as_ref()?;
        if !pattern.is_match(sentence) {
            return None;
        }

        let marked = pattern.replace_all(sentence, |caps: &Captures| {
            format!("{}{}{}", self.highlight.open, &caps[0], self.highlight.close)
        });
        Some(marked.into_owned())
    }

    /// Matching records in input order
    pub fn search(&self, records: &[SentenceRecord]) -> Vec<SearchResult> {
        records
            .iter()
            .filter_map(|record| {
                self.highlight(&record.sentence).map(|sentence| SearchResult {
                    page: record.page,
                    sentence,
                })
            })
            .collect()
    }
}

/// Compile `keyword` and search `records` in one call
pub fn keyword_search(
    records: &[SentenceRecord],
    keyword: &str,
    highlight: &Highlight,
) -> Result<Vec<SearchResult>, regex::Error> {
    Ok(KeywordSearch::new(keyword, highlight.clone())?.search(records))
}
