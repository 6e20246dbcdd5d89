//! PDF error types

use std::path::PathBuf;

use thiserror::Error;

/// PDF access errors
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("PDF file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load PDF: {0}")]
    LoadError(String),
    #[error("Page {0} not found (document has {1} pages)")]
    PageNotFound(usize, usize),
    #[error("Failed to render page: {0}")]
    RenderError(String),
    #[error("MuPDF error: {0}")]
    MuPdfError(String),
}

impl From<mupdf::Error> for PdfError {
    fn from(e: mupdf::Error) -> Self {
        PdfError::MuPdfError(e.to_string())
    }
}

/// Result type alias for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;
