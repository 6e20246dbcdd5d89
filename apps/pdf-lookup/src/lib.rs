//! PDF Lookup Library
//!
//! Sentence-level keyword search over PDF files. Pages are read from the
//! PDF text layer when it has one and recognised with Tesseract when it
//! doesn't.
//!
//! # Modules
//!
//! - `pdf`: Page access and text-layer strategies via MuPDF
//! - `ocr`: Tesseract recognition with orientation handling
//! - `text`: Cleanup and sentence segmentation
//! - `extract`: Per-page text-layer/OCR fallback producing sentence records
//! - `search`: In-memory keyword search with highlighting
//! - `db`: SQLite FTS5 sentence index
//!
//! # Usage
//!
//! ```rust,ignore
//! use pdf_lookup::{extract::TextExtractor, search::{keyword_search, Highlight}};
//!
//! let extractor = TextExtractor::from_config(&config, ocr);
//! let document = extractor.extract(Path::new("report.pdf")).await?;
//! let results = keyword_search(&document.sentences, "revenue", &Highlight::brackets())?;
//! ```

pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod extract;
pub mod logging;
pub mod ocr;
pub mod pdf;
pub mod search;
pub mod text;

pub use error::{AppError, Result};
