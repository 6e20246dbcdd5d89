//! Generated PDFs for tests

use std::path::{Path, PathBuf};

/// A US Letter page with one line of Helvetica text and a `/Rotate` entry
///
/// An empty `text` produces a page with no text layer.
pub struct FixturePage<'a> {
    pub text: &'a str,
    pub rotate: u32,
}

impl<'a> FixturePage<'a> {
    pub fn text(text: &'a str) -> Self {
        Self { text, rotate: 0 }
    }

    pub fn blank() -> Self {
        Self { text: "", rotate: 0 }
    }

    pub fn rotated(mut self, degrees: u32) -> Self {
        self.rotate = degrees;
        self
    }
}

/// Build a PDF with a correct cross-reference table
pub fn pdf_bytes(pages: &[FixturePage]) -> Vec<u8> {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        String::new(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut kids = Vec::with_capacity(pages.len());
    for (i, page) in pages.iter().enumerate() {
        let page_obj = 4 + i * 2;
        kids.push(format!("{} 0 R", page_obj));
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Rotate {} /Contents {} 0 R /Resources << /Font << /F1 3 0 R >> >> >>",
            page.rotate,
            page_obj + 1
        ));

        let stream = if page.text.is_empty() {
            String::new()
        } else {
            format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", page.text)
        };
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
    }
    objects[1] = format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    );

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref
    ));

    pdf.into_bytes()
}

/// Write a generated PDF into `dir`
pub fn write_pdf(dir: &Path, name: &str, pages: &[FixturePage]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_bytes(pages)).unwrap();
    path
}
