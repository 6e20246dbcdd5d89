//! OCR Types
//!
//! Types shared by OCR providers and the page recognition service.

use image::DynamicImage;
use serde::Serialize;

/// Clockwise rotation that makes a page image upright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Orientation {
    #[default]
    Upright,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    /// Map a rotation in degrees (any multiple of 90, may be negative)
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::Upright),
            90 => Some(Self::Rotate90),
            180 => Some(Self::Rotate180),
            270 => Some(Self::Rotate270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> u16 {
        match self {
            Self::Upright => 0,
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
        }
    }

    /// Apply the correction to an image
    pub fn correct(&self, image: &DynamicImage) -> DynamicImage {
        match self {
            Self::Upright => image.clone(),
            Self::Rotate90 => image.rotate90(),
            Self::Rotate180 => image.rotate180(),
            Self::Rotate270 => image.rotate270(),
        }
    }
}

/// OCR result from a provider
#[derive(Debug, Clone, Serialize)]
pub struct OcrResult {
    /// Recognized text
    pub text: String,
    /// Name of the provider that produced the text
    pub provider: &'static str,
}

/// Recognized text for a rendered page
#[derive(Debug, Clone, Serialize)]
pub struct PageOcr {
    pub text: String,
    /// Orientation correction applied before recognition
    pub orientation: Orientation,
    /// Whether the text came from the upside-down retry
    pub retried_rotated: bool,
    /// Provider that produced the text
    pub provider: &'static str,
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR provider not available: {0}")]
    ProviderNotAvailable(String),

    #[error("Failed to prepare page image: {0}")]
    ImageError(String),

    #[error("OCR processing failed: {0}")]
    ProcessingError(String),

    #[error("Orientation detection failed: {0}")]
    OrientationError(String),
}

impl OcrError {
    /// Whether the error means the engine itself cannot be used
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ProviderNotAvailable(_))
    }
}
