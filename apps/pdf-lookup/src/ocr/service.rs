//! OCR Service
//!
//! Turns a rendered page image into text: orientation correction, optional
//! cleanup, recognition, and one upside-down retry when recognition fails.

use std::io::Cursor;
use std::sync::Arc;

use image::DynamicImage;

use super::locate::locate_tesseract;
use super::preprocess;
use super::provider::{OcrProvider, TesseractProvider};
use super::types::{OcrError, Orientation, PageOcr};
use crate::config::OcrConfig;

/// Page recognition options
#[derive(Debug, Clone)]
pub struct OcrOptions {
    pub language: String,
    pub detect_orientation: bool,
    pub preprocess: bool,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            detect_orientation: true,
            preprocess: false,
        }
    }
}

impl From<&OcrConfig> for OcrOptions {
    fn from(config: &OcrConfig) -> Self {
        Self {
            language: config.language.clone(),
            detect_orientation: config.detect_orientation,
            preprocess: config.preprocess,
        }
    }
}

/// OCR service for scanned PDF pages
pub struct OcrService {
    provider: Arc<dyn OcrProvider>,
    options: OcrOptions,
}

impl OcrService {
    pub fn new(provider: Arc<dyn OcrProvider>, options: OcrOptions) -> Self {
        Self { provider, options }
    }

    /// Build a Tesseract-backed service
    ///
    /// Locates the executable and checks that it runs, so a missing or
    /// broken install is reported before any page is processed.
    pub async fn tesseract(config: &OcrConfig) -> Result<Self, OcrError> {
        let executable = locate_tesseract(config.tesseract_cmd.as_deref()).ok_or_else(|| {
            OcrError::ProviderNotAvailable(
                "tesseract executable not found in default locations or PATH".to_string(),
            )
        })?;

        tracing::debug!(executable = %executable.display(), "Using tesseract");

        let provider = TesseractProvider::new(executable, &config.language);
        let service = Self::new(Arc::new(provider), config.into());
        service.ensure_available().await?;
        Ok(service)
    }

    /// Fail with `ProviderNotAvailable` if the provider cannot be run
    pub async fn ensure_available(&self) -> Result<(), OcrError> {
        if self.provider.is_available().await {
            Ok(())
        } else {
            Err(OcrError::ProviderNotAvailable(format!(
                "{} is installed but could not be run",
                self.provider.name()
            )))
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Recognise the text of a rendered page
    pub async fn recognize_page(&self, image: &DynamicImage) -> Result<PageOcr, OcrError> {
        let orientation = self.detect_orientation(image).await?;
        let mut prepared = orientation.correct(image);
        if self.options.preprocess {
            prepared = preprocess::binarize(&prepared);
        }

        let lang = Some(self.options.language.as_str());

        match self.provider.recognize(&encode_png(&prepared)?, lang).await {
            Ok(result) => Ok(PageOcr {
                text: result.text,
                orientation,
                retried_rotated: false,
                provider: result.provider,
            }),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::warn!(
                    "OCR provider {} failed: {}, retrying upside down",
                    self.provider.name(),
                    e
                );
                let flipped = prepared.rotate180();
                let result = self.provider.recognize(&encode_png(&flipped)?, lang).await?;
                Ok(PageOcr {
                    text: result.text,
                    orientation,
                    retried_rotated: true,
                    provider: result.provider,
                })
            }
        }
    }

    /// Orientation detection never fails the page; errors mean "upright"
    async fn detect_orientation(&self, image: &DynamicImage) -> Result<Orientation, OcrError> {
        if !self.options.detect_orientation {
            return Ok(Orientation::Upright);
        }

        match self.provider.detect_orientation(&encode_png(image)?).await {
            Ok(orientation) => {
                if orientation != Orientation::Upright {
                    tracing::debug!(degrees = orientation.degrees(), "Rotating page before OCR");
                }
                Ok(orientation)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::debug!("Orientation detection failed: {}, assuming upright", e);
                Ok(Orientation::Upright)
            }
        }
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, OcrError> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .map_err(|e| OcrError::ImageError(format!("Failed to encode page: {}", e)))?;
    Ok(buffer)
}
