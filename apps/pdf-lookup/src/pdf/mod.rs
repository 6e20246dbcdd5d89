//! PDF access module
//!
//! Opens PDFs with MuPDF and exposes each page through the [`PageContent`]
//! trait: direct text in three shapes (plain, blocks, words) and a raster
//! for OCR. The extractor only sees the trait, so the fallback policy can be
//! exercised without real documents.

#[cfg(test)]
pub(crate) mod fixtures;
mod mupdf_document;
mod page;
mod strategy;
mod types;

pub use mupdf_document::{MuPdfDocument, MuPdfPage};
pub use page::{PageContent, PdfSource};
#[cfg(test)]
pub use page::{MockPage, MockPdf};
pub use strategy::{first_direct_text, TextStrategy};
pub use types::{PdfError, Result};
