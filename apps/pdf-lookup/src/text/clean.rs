//! Text cleanup applied to every page before sentence splitting

use std::sync::LazyLock;

use regex::Regex;

/// A word broken with a hyphen at a line end: `exam-\nple`
static HYPHEN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)-[ \t]*\r?\n\s*(\w+)").expect("valid hyphen regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Merge hyphen-broken words, collapse whitespace runs, trim
pub fn clean_text(text: &str) -> String {
    let merged = HYPHEN_BREAK.replace_all(text, "${1}${2}");
    WHITESPACE.replace_all(&merged, " ").trim().to_string()
}
