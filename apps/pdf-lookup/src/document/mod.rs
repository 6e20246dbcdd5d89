//! Extracted document model
//!
//! Page texts and sentence records produced by the extractor, consumed by
//! keyword search and the sentence index.

mod dump;
mod types;

pub use dump::write_text_dump;
pub use types::{ExtractedDocument, PageText, SentenceRecord, TextSource};
