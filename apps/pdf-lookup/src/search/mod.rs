//! In-memory keyword search

mod keyword;

pub use keyword::{keyword_search, Highlight, KeywordSearch, SearchResult};
