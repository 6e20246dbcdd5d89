//! OCR Module
//!
//! Provides OCR (Optical Character Recognition) for PDF pages without a
//! text layer. Tesseract is the only backend; it is run as an external
//! process.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pdf_lookup::ocr::OcrService;
//!
//! let service = OcrService::tesseract(&config.ocr).await?;
//! let page = service.recognize_page(&rendered).await?;
//! println!("{}", page.text);
//! ```

mod locate;
mod preprocess;
mod provider;
mod service;
mod types;

pub use locate::locate_tesseract;
pub use preprocess::{binarize, otsu_threshold};
pub use provider::{parse_osd, OcrProvider, TesseractProvider};
pub use service::{OcrOptions, OcrService};
pub use types::{OcrError, OcrResult, Orientation, PageOcr};

#[cfg(test)]
pub use provider::MockProvider;
