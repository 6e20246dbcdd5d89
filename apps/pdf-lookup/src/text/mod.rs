//! Text cleanup and sentence segmentation

mod clean;
mod sentences;

pub use clean::clean_text;
pub use sentences::SentenceTokenizer;
