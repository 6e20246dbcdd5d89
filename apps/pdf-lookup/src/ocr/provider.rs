//! OCR Providers
//!
//! Defines the provider trait and the Tesseract implementation.

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::types::{OcrError, OcrResult, Orientation};

/// OCR provider trait
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Check if the provider can be run
    async fn is_available(&self) -> bool;

    /// Perform OCR on an encoded image
    async fn recognize(&self, image_data: &[u8], language: Option<&str>) -> Result<OcrResult, OcrError>;

    /// Detect how the image must be rotated to be upright
    async fn detect_orientation(&self, image_data: &[u8]) -> Result<Orientation, OcrError>;
}

/// Tesseract OCR provider
///
/// Shells out to the `tesseract` executable. Each call writes the image to a
/// scoped temporary file that is removed when the call returns.
pub struct TesseractProvider {
    executable: PathBuf,
    default_language: String,
}

/// Page segmentation mode for recognition: a single uniform block of text
const RECOGNITION_PSM: &str = "6";

/// Page segmentation mode for orientation and script detection only
const OSD_PSM: &str = "0";

impl TesseractProvider {
    pub fn new(executable: impl Into<PathBuf>, default_language: &str) -> Self {
        Self {
            executable: executable.into(),
            default_language: default_language.to_string(),
        }
    }

    async fn run(&self, image_data: &[u8], args: &[&str]) -> Result<String, OcrError> {
        let mut input = tempfile::Builder::new()
            .prefix("pdf-lookup-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::ProcessingError(format!("Failed to create temp file: {}", e)))?;
        input
            .write_all(image_data)
            .and_then(|_| input.flush())
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write temp file: {}", e)))?;

        let output = Command::new(&self.executable)
            .arg(input.path())
            .arg("stdout")
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    OcrError::ProviderNotAvailable(format!(
                        "cannot run {}: {}",
                        self.executable.display(),
                        e
                    ))
                }
                _ => OcrError::ProcessingError(format!("Failed to run tesseract: {}", e)),
            })?;

        // `input` is dropped (and the file removed) on every path out of here
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl OcrProvider for TesseractProvider {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    async fn recognize(&self, image_data: &[u8], language: Option<&str>) -> Result<OcrResult, OcrError> {
        let lang = language.unwrap_or(&self.default_language);

        let text = self
            .run(image_data, &["-l", lang, "--oem", "3", "--psm", RECOGNITION_PSM])
            .await?;

        Ok(OcrResult {
            text: text.trim().to_string(),
            provider: self.name(),
        })
    }

    async fn detect_orientation(&self, image_data: &[u8]) -> Result<Orientation, OcrError> {
        let report = self.run(image_data, &["--psm", OSD_PSM]).await?;
        parse_osd(&report)
    }
}

/// Parse Tesseract's orientation and script detection report
///
/// Only the `Rotate:` line is used: the clockwise rotation that makes the
/// page upright.
pub fn parse_osd(report: &str) -> Result<Orientation, OcrError> {
    let rotate = report
        .lines()
        .find_map(|line| line.trim().strip_prefix("Rotate:"))
        .ok_or_else(|| OcrError::OrientationError("no Rotate line in OSD output".into()))?;

    let degrees: i32 = rotate
        .trim()
        .parse()
        .map_err(|_| OcrError::OrientationError(format!("bad rotation: {}", rotate.trim())))?;

    Orientation::from_degrees(degrees)
        .ok_or_else(|| OcrError::OrientationError(format!("unsupported rotation: {}", degrees)))
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    /// Texts returned by successive `recognize` calls; `None` entries fail
    pub responses: std::sync::Mutex<std::collections::VecDeque<Option<String>>>,
    pub orientation: Result<Orientation, ()>,
    pub available: bool,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockProvider {
    pub fn returning(responses: Vec<Option<&str>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            ),
            orientation: Ok(Orientation::Upright),
            available: true,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl OcrProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(&self, _image_data: &[u8], _language: Option<&str>) -> Result<OcrResult, OcrError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if !self.available {
            return Err(OcrError::ProviderNotAvailable("mock disabled".into()));
        }
        let next = self.responses.lock().unwrap().pop_front().flatten();
        match next {
            Some(text) => Ok(OcrResult {
                text,
                provider: "mock",
            }),
            None => Err(OcrError::ProcessingError("mock failure".into())),
        }
    }

    async fn detect_orientation(&self, _image_data: &[u8]) -> Result<Orientation, OcrError> {
        self.orientation
            .map_err(|_| OcrError::OrientationError("mock osd failure".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OSD_REPORT: &str = "Page number: 0\n\
        Orientation in degrees: 270\n\
        Rotate: 90\n\
        Orientation confidence: 2.35\n\
        Script: Latin\n\
        Script confidence: 1.67\n";

    #[test]
    fn test_parse_osd() {
        assert_eq!(parse_osd(OSD_REPORT).unwrap(), Orientation::Rotate90);
        assert_eq!(parse_osd("Rotate: 0").unwrap(), Orientation::Upright);
    }

    #[test]
    fn test_parse_osd_rejects_garbage() {
        assert!(matches!(
            parse_osd("Too few characters. Skipping this page"),
            Err(OcrError::OrientationError(_))
        ));
        assert!(parse_osd("Rotate: sideways").is_err());
        assert!(parse_osd("Rotate: 45").is_err());
    }

    #[tokio::test]
    async fn test_missing_executable_is_unavailable() {
        let provider = TesseractProvider::new("/nonexistent/bin/tesseract", "eng");
        assert!(!provider.is_available().await);

        let err = provider.recognize(b"png", None).await.unwrap_err();
        assert!(err.is_fatal());
    }
}
