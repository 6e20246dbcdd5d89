//! Page-level interfaces

use image::DynamicImage;

use super::types::Result;

/// Text and raster access for a single, upright page
///
/// Implementations normalise the page rotation to 0 degrees before any
/// method is called.
pub trait PageContent {
    /// Page number (1-indexed)
    fn number(&self) -> u32;

    /// Text layer as MuPDF lays it out (lines separated by newlines)
    fn plain_text(&self) -> Result<String>;

    /// One string per text block, lines joined with newlines
    fn blocks(&self) -> Result<Vec<String>>;

    /// Individual words in reading order
    fn words(&self) -> Result<Vec<String>>;

    /// Rasterise the page at the given resolution
    fn render(&self, dpi: u32) -> Result<DynamicImage>;
}

/// A paginated document
pub trait PdfSource {
    fn page_count(&self) -> usize;

    /// Load a page by 0-based index
    fn load_page(&self, index: usize) -> Result<Box<dyn PageContent + '_>>;
}

/// In-memory page for testing
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    pub number: u32,
    pub plain: String,
    pub blocks: Vec<String>,
    pub words: Vec<String>,
    /// Shade of the rendered raster; `None` makes rendering fail
    pub raster: Option<u8>,
}

#[cfg(test)]
impl MockPage {
    pub fn with_text(number: u32, plain: &str) -> Self {
        Self {
            number,
            plain: plain.to_string(),
            raster: Some(255),
            ..Default::default()
        }
    }

    pub fn scanned(number: u32) -> Self {
        Self {
            number,
            raster: Some(255),
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl PageContent for MockPage {
    fn number(&self) -> u32 {
        self.number
    }

    fn plain_text(&self) -> Result<String> {
        Ok(self.plain.clone())
    }

    fn blocks(&self) -> Result<Vec<String>> {
        Ok(self.blocks.clone())
    }

    fn words(&self) -> Result<Vec<String>> {
        Ok(self.words.clone())
    }

    fn render(&self, _dpi: u32) -> Result<DynamicImage> {
        let shade = self
            .raster
            .ok_or_else(|| super::PdfError::RenderError("no raster".into()))?;
        Ok(DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
            8,
            8,
            image::Luma([shade]),
        )))
    }
}

/// In-memory document for testing
#[cfg(test)]
pub struct MockPdf {
    pub pages: Vec<MockPage>,
}

#[cfg(test)]
impl PdfSource for MockPdf {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(&self, index: usize) -> Result<Box<dyn PageContent + '_>> {
        self.pages
            .get(index)
            .cloned()
            .map(|p| Box::new(p) as Box<dyn PageContent>)
            .ok_or(super::PdfError::PageNotFound(index + 1, self.pages.len()))
    }
}
