//! MuPDF-backed document access
//!
//! MuPDF's fz_context is not thread-safe; a `MuPdfDocument` is opened,
//! walked page by page and dropped on the thread that created it.

use std::path::Path;

use image::{DynamicImage, RgbImage};
use mupdf::pdf::{PdfDocument, PdfPage};
use mupdf::{Colorspace, Matrix, TextPageOptions};

use super::page::{PageContent, PdfSource};
use super::types::{PdfError, Result};

/// An open PDF document
pub struct MuPdfDocument {
    doc: PdfDocument,
    page_count: usize,
}

impl MuPdfDocument {
    /// Open a PDF from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PdfError::NotFound(path.to_path_buf()));
        }

        let path_str = path.to_string_lossy();
        let doc = PdfDocument::open(&path_str)
            .map_err(|e| PdfError::LoadError(format!("{}: {}", path.display(), e)))?;
        let page_count = doc.page_count()? as usize;

        tracing::debug!(path = %path.display(), page_count, "Opened PDF");

        Ok(Self { doc, page_count })
    }
}

impl PdfSource for MuPdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn load_page(&self, index: usize) -> Result<Box<dyn PageContent + '_>> {
        if index >= self.page_count {
            return Err(PdfError::PageNotFound(index + 1, self.page_count));
        }

        let page = self.doc.load_page(index as i32)?;
        let page = PdfPage::try_from(page)?;
        Ok(Box::new(MuPdfPage::upright(page, index as u32 + 1)?))
    }
}

/// A single page with its rotation normalised to 0 degrees
pub struct MuPdfPage {
    page: PdfPage,
    number: u32,
}

impl MuPdfPage {
    /// Wrap a page, clearing any declared /Rotate
    pub fn upright(mut page: PdfPage, number: u32) -> Result<Self> {
        let rotation = page.rotation()?;
        if rotation != 0 {
            tracing::debug!(page = number, rotation, "Normalising page rotation");
            page.set_rotation(0)?;
        }
        Ok(Self { page, number })
    }

    /// Walk the structured text, producing one string per block
    fn block_lines(&self) -> Result<Vec<Vec<String>>> {
        let text_page = self.page.to_text_page(TextPageOptions::empty())?;
        let mut blocks = Vec::new();

        for block in text_page.blocks() {
            let mut lines = Vec::new();
            for line in block.lines() {
                let line_text: String = line.chars().filter_map(|ch| ch.char()).collect();
                lines.push(line_text);
            }
            blocks.push(lines);
        }

        Ok(blocks)
    }
}

impl PageContent for MuPdfPage {
    fn number(&self) -> u32 {
        self.number
    }

    fn plain_text(&self) -> Result<String> {
        self.page.to_text().map_err(Into::into)
    }

    fn blocks(&self) -> Result<Vec<String>> {
        Ok(self
            .block_lines()?
            .into_iter()
            .map(|lines| lines.join("\n"))
            .collect())
    }

    fn words(&self) -> Result<Vec<String>> {
        Ok(self
            .block_lines()?
            .iter()
            .flatten()
            .flat_map(|line| line.split_whitespace())
            .map(str::to_string)
            .collect())
    }

    fn render(&self, dpi: u32) -> Result<DynamicImage> {
        // 72 DPI is MuPDF's identity scale
        let scale = dpi as f32 / 72.0;
        let matrix = Matrix::new_scale(scale, scale);
        let colorspace = Colorspace::device_rgb();
        let pixmap = self.page.to_pixmap(&matrix, &colorspace, false, true)?;

        let width = pixmap.width() as u32;
        let height = pixmap.height() as u32;
        let samples = pixmap.samples();
        let n = pixmap.n() as usize;

        let mut rgb_buffer = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height as usize {
            for x in 0..width as usize {
                let offset = (y * width as usize + x) * n;
                let r = samples.get(offset).copied().unwrap_or(255);
                let g = samples.get(offset + 1).copied().unwrap_or(r);
                let b = samples.get(offset + 2).copied().unwrap_or(r);
                rgb_buffer.extend_from_slice(&[r, g, b]);
            }
        }

        let img = RgbImage::from_raw(width, height, rgb_buffer).ok_or_else(|| {
            PdfError::RenderError(format!("page {}: pixmap size mismatch", self.number))
        })?;

        Ok(DynamicImage::ImageRgb8(img))
    }
}
