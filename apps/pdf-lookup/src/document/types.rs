//! Core document types
//!
//! What the extractor produces for one PDF: per-page text with its origin,
//! and the sentence records derived from it.

use std::path::PathBuf;

use serde::Serialize;

use crate::pdf::TextStrategy;

/// One sentence and the page it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceRecord {
    /// Page number (1-indexed)
    pub page: u32,
    pub sentence: String,
}

impl SentenceRecord {
    pub fn new(page: u32, sentence: impl Into<String>) -> Self {
        Self {
            page,
            sentence: sentence.into(),
        }
    }
}

/// Where a page's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "strategy")]
pub enum TextSource {
    /// The PDF text layer, read with the given strategy
    Direct(TextStrategy),
    /// Optical character recognition of the rendered page
    Ocr,
    /// Nothing usable; OCR failed or returned nothing
    Empty,
}

/// Cleaned text of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageText {
    pub page: u32,
    pub text: String,
    pub source: TextSource,
}

impl PageText {
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            text: String::new(),
            source: TextSource::Empty,
        }
    }
}

/// Everything extracted from one PDF
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    pub path: PathBuf,
    pub page_count: usize,
    pub pages: Vec<PageText>,
    /// Sentences in page order
    pub sentences: Vec<SentenceRecord>,
}

impl ExtractedDocument {
    /// Number of pages whose text came from OCR
    pub fn ocr_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.source == TextSource::Ocr)
            .count()
    }

    /// Cleaned page texts joined with newlines
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
