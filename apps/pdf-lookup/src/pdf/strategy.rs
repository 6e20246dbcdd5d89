//! Direct text-layer strategies
//!
//! A page's text layer can be read in several shapes. Each shape is a
//! strategy; the extractor tries a configured list of them in order and
//! keeps the first one that produces non-blank text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::page::PageContent;
use super::types::Result;

/// Direct text extraction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStrategy {
    /// Whole-page text as laid out by MuPDF
    Plain,
    /// Text blocks joined with single spaces
    Blocks,
    /// Words joined with single spaces
    Words,
}

impl TextStrategy {
    /// Plain, then blocks, then words
    pub fn default_chain() -> Vec<TextStrategy> {
        vec![Self::Plain, Self::Blocks, Self::Words]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Blocks => "blocks",
            Self::Words => "words",
        }
    }

    /// Read the page's text layer in this strategy's shape
    pub fn extract(&self, page: &dyn PageContent) -> Result<String> {
        match self {
            Self::Plain => page.plain_text(),
            Self::Blocks => Ok(join_fragments(page.blocks()?)),
            Self::Words => Ok(join_fragments(page.words()?)),
        }
    }
}

impl fmt::Display for TextStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown text strategy: {0}")]
pub struct UnknownStrategy(String);

impl FromStr for TextStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "blocks" => Ok(Self::Blocks),
            "words" => Ok(Self::Words),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// Run strategies in order, returning the first non-blank result
///
/// Returns `Ok(None)` when every strategy comes back blank; strategy errors
/// are propagated.
pub fn first_direct_text(
    strategies: &[TextStrategy],
    page: &dyn PageContent,
) -> Result<Option<(TextStrategy, String)>> {
    for strategy in strategies {
        let text = strategy.extract(page)?;
        if !text.trim().is_empty() {
            return Ok(Some((*strategy, text)));
        }
    }
    Ok(None)
}

fn join_fragments(fragments: Vec<String>) -> String {
    fragments
        .into_iter()
        .filter(|f| !f.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::MockPage;

    #[test]
    fn test_plain_text_wins_when_present() {
        let mut page = MockPage::with_text(1, "Plain layer.");
        page.blocks = vec!["Block layer.".into()];

        let (strategy, text) = first_direct_text(&TextStrategy::default_chain(), &page)
            .unwrap()
            .unwrap();
        assert_eq!(strategy, TextStrategy::Plain);
        assert_eq!(text, "Plain layer.");
    }

    #[test]
    fn test_falls_back_to_blocks_then_words() {
        let mut page = MockPage::with_text(1, "  \n ");
        page.blocks = vec!["".into(), "   ".into()];
        page.words = vec!["Only".into(), " ".into(), "words".into()];

        let (strategy, text) = first_direct_text(&TextStrategy::default_chain(), &page)
            .unwrap()
            .unwrap();
        assert_eq!(strategy, TextStrategy::Words);
        assert_eq!(text, "Only words");
    }

    #[test]
    fn test_blocks_joined_with_single_spaces() {
        let mut page = MockPage::scanned(2);
        page.blocks = vec!["First block".into(), "".into(), "second block".into()];

        let (strategy, text) = first_direct_text(&TextStrategy::default_chain(), &page)
            .unwrap()
            .unwrap();
        assert_eq!(strategy, TextStrategy::Blocks);
        assert_eq!(text, "First block second block");
    }

    #[test]
    fn test_all_blank_returns_none() {
        let page = MockPage::scanned(3);
        assert!(first_direct_text(&TextStrategy::default_chain(), &page)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_configured_order_is_respected() {
        let mut page = MockPage::with_text(1, "Plain layer.");
        page.words = vec!["word".into()];

        let (strategy, _) = first_direct_text(&[TextStrategy::Words, TextStrategy::Plain], &page)
            .unwrap()
            .unwrap();
        assert_eq!(strategy, TextStrategy::Words);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Blocks".parse::<TextStrategy>().unwrap(), TextStrategy::Blocks);
        assert_eq!("text".parse::<TextStrategy>().unwrap(), TextStrategy::Plain);
        assert!("dict".parse::<TextStrategy>().is_err());
    }
}
