//! Error types for PDF lookup

use std::path::PathBuf;

use thiserror::Error;

use crate::ocr::OcrError;
use crate::pdf::PdfError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("PDF file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("PDF processing failed: {0}")]
    Extraction(String),

    #[error("PDF contains no extractable text (may be scanned)")]
    NoExtractableText,

    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    #[error("Invalid keyword: {0}")]
    InvalidKeyword(#[from] regex::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// A short suggestion printed under the error message, if one applies
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::FileNotFound(_) => Some("Check the path and try again."),
            Self::NoExtractableText => Some(
                "The document may be image-only. Make sure tesseract is installed \
                 so scanned pages can be recognised.",
            ),
            Self::OcrUnavailable(_) => Some(
                "Install tesseract or point TESSERACT_CMD at the executable.",
            ),
            Self::Extraction(_) => Some("The file may be damaged or not a PDF."),
            Self::InvalidKeyword(_) => Some("Try a shorter keyword."),
            Self::Database(_) => Some("Check INDEX_DATABASE_URL and file permissions."),
            Self::Io(_) => None,
        }
    }
}

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::NotFound(path) => AppError::FileNotFound(path),
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl From<OcrError> for AppError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::ProviderNotAvailable(msg) => AppError::OcrUnavailable(msg),
            other => AppError::Extraction(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_not_found_maps_to_file_not_found() {
        let err: AppError = PdfError::NotFound(PathBuf::from("missing.pdf")).into();
        assert!(matches!(err, AppError::FileNotFound(_)));
        assert_eq!(err.to_string(), "PDF file not found: missing.pdf");
    }

    #[test]
    fn test_ocr_unavailable_is_distinct_from_processing_failure() {
        let unavailable: AppError = OcrError::ProviderNotAvailable("no tesseract".into()).into();
        assert!(matches!(unavailable, AppError::OcrUnavailable(_)));

        let failed: AppError = OcrError::ProcessingError("bad image".into()).into();
        assert!(matches!(failed, AppError::Extraction(_)));
    }

    #[test]
    fn test_hints() {
        assert!(AppError::NoExtractableText.hint().is_some());
        assert!(AppError::OcrUnavailable("x".into()).hint().unwrap().contains("TESSERACT_CMD"));
    }
}
