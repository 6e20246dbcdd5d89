//! Plain-text dump of an extracted document

use std::fs;
use std::path::{Path, PathBuf};

use super::types::ExtractedDocument;
use crate::error::Result;

/// Write the document's cleaned text to `<dir>/<pdf stem>.txt`
///
/// Creates `dir` if needed and overwrites an existing dump.
pub fn write_text_dump(dir: &Path, document: &ExtractedDocument) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let stem = document
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let target = dir.join(format!("{}.txt", stem));

    fs::write(&target, document.full_text())?;
    tracing::debug!(path = %target.display(), "Wrote text dump");

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{PageText, TextSource};
    use crate::pdf::TextStrategy;

    #[test]
    fn test_dump_uses_pdf_stem() {
        let dir = tempfile::tempdir().unwrap();
        let processed = dir.path().join("processed");
        let document = ExtractedDocument {
            path: PathBuf::from("/books/history of rome.pdf"),
            page_count: 2,
            pages: vec![
                PageText {
                    page: 1,
                    text: "Rome was not built in a day.".into(),
                    source: TextSource::Direct(TextStrategy::Plain),
                },
                PageText {
                    page: 2,
                    text: "Nor was it scanned in one.".into(),
                    source: TextSource::Ocr,
                },
            ],
            sentences: Vec::new(),
        };

        let written = write_text_dump(&processed, &document).unwrap();
        assert_eq!(written, processed.join("history of rome.txt"));
        assert_eq!(
            fs::read_to_string(&written).unwrap(),
            "Rome was not built in a day.\nNor was it scanned in one."
        );
    }
}
