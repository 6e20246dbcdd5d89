//! Page text extraction with OCR fallback
//!
//! Each page is read through the configured text-layer strategies first.
//! Pages where every strategy comes back blank are rendered and sent to
//! OCR. The cleaned text of every page is then split into sentences.

use std::path::Path;

use crate::config::Config;
use crate::document::{ExtractedDocument, PageText, SentenceRecord, TextSource};
use crate::error::{AppError, Result};
use crate::ocr::OcrService;
use crate::pdf::{first_direct_text, MuPdfDocument, PageContent, PdfSource, TextStrategy};
use crate::text::{clean_text, SentenceTokenizer};

const DEFAULT_DPI: u32 = 300;

/// PDF to sentence records
pub struct TextExtractor {
    strategies: Vec<TextStrategy>,
    tokenizer: SentenceTokenizer,
    ocr: Option<OcrService>,
    dpi: u32,
}

impl TextExtractor {
    /// Extractor without OCR; scanned pages fail with `OcrUnavailable`
    pub fn new(strategies: Vec<TextStrategy>, tokenizer: SentenceTokenizer) -> Self {
        Self {
            strategies,
            tokenizer,
            ocr: None,
            dpi: DEFAULT_DPI,
        }
    }

    pub fn from_config(config: &Config, ocr: Option<OcrService>) -> Self {
        Self::new(
            config.extraction.strategies.clone(),
            SentenceTokenizer::for_language(&config.extraction.sentence_language),
        )
        .with_ocr(ocr)
        .with_dpi(config.ocr.dpi)
    }

    pub fn with_ocr(mut self, ocr: Option<OcrService>) -> Self {
        self.ocr = ocr;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Open and extract a PDF on disk
    pub async fn extract(&self, path: &Path) -> Result<ExtractedDocument> {
        let document = MuPdfDocument::open(path)?;
        tracing::info!(path = %path.display(), pages = document.page_count(), "Processing PDF");
        self.extract_from(&document, path).await
    }

    /// Extract every page of an already opened document
    ///
    /// Fails with `NoExtractableText` when no page yields a sentence.
    pub async fn extract_from(&self, source: &dyn PdfSource, path: &Path) -> Result<ExtractedDocument> {
        let page_count = source.page_count();
        let mut pages = Vec::with_capacity(page_count);
        let mut sentences = Vec::new();

        for index in 0..page_count {
            let page = source.load_page(index)?;
            let page_text = self.page_text(page.as_ref()).await?;

            sentences.extend(
                self.tokenizer
                    .sentences(&page_text.text)
                    .into_iter()
                    .map(|s| SentenceRecord::new(page_text.page, s)),
            );
            pages.push(page_text);
        }

        if sentences.is_empty() {
            return Err(AppError::NoExtractableText);
        }

        let document = ExtractedDocument {
            path: path.to_path_buf(),
            page_count,
            pages,
            sentences,
        };

        tracing::info!(
            sentences = document.sentences.len(),
            ocr_pages = document.ocr_pages(),
            "Extraction complete"
        );

        Ok(document)
    }

    async fn page_text(&self, page: &dyn PageContent) -> Result<PageText> {
        let number = page.number();

        if let Some((strategy, raw)) = first_direct_text(&self.strategies, page)? {
            tracing::debug!(page = number, strategy = %strategy, "Using text layer");
            return Ok(PageText {
                page: number,
                text: clean_text(&raw),
                source: TextSource::Direct(strategy),
            });
        }

        let ocr = self.ocr.as_ref().ok_or_else(|| {
            AppError::OcrUnavailable(format!(
                "page {} has no text layer and tesseract was not found",
                number
            ))
        })?;

        tracing::info!(page = number, "No text layer, running OCR");

        let image = match page.render(self.dpi) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(page = number, "Failed to render page for OCR: {}", e);
                return Ok(PageText::empty(number));
            }
        };

        match ocr.recognize_page(&image).await {
            Ok(result) => {
                tracing::debug!(
                    page = number,
                    provider = result.provider,
                    rotation = result.orientation.degrees(),
                    retried_rotated = result.retried_rotated,
                    "Page recognised"
                );
                if result.retried_rotated {
                    tracing::info!(page = number, "Page was recognised upside down");
                }
                Ok(PageText {
                    page: number,
                    text: clean_text(&result.text),
                    source: TextSource::Ocr,
                })
            }
            Err(e) if e.is_fatal() => Err(e.into()),
            Err(e) => {
                tracing::warn!(page = number, "OCR failed, skipping page: {}", e);
                Ok(PageText::empty(number))
            }
        }
    }
}
