//! Configuration management for PDF lookup
//!
//! Values come from the environment (a `.env` file is honoured by the
//! binaries through `dotenvy`). Anything unset falls back to the defaults.

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::pdf::TextStrategy;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub ocr: OcrConfig,
    pub extraction: ExtractionConfig,
    pub index: IndexConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Explicit tesseract executable, skips discovery when set
    pub tesseract_cmd: Option<PathBuf>,
    pub language: String,
    pub dpi: u32,
    pub detect_orientation: bool,
    /// Grayscale + Otsu threshold before recognition
    pub preprocess: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Direct text strategies, tried in order
    pub strategies: Vec<TextStrategy>,
    pub sentence_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    pub database_url: String,
    pub processed_dir: PathBuf,
    pub min_sentence_len: usize,
}

pub const MIN_DPI: u32 = 72;
pub const MAX_DPI: u32 = 600;

impl Default for Config {
    fn default() -> Self {
        Config {
            ocr: OcrConfig {
                tesseract_cmd: None,
                language: "eng".to_string(),
                dpi: 300,
                detect_orientation: true,
                preprocess: false,
            },
            extraction: ExtractionConfig {
                strategies: TextStrategy::default_chain(),
                sentence_language: "english".to_string(),
            },
            index: IndexConfig {
                database_url: "sqlite:history_search.db".to_string(),
                processed_dir: PathBuf::from("processed"),
                min_sentence_len: 10,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let strategies = match env::var("EXTRACT_STRATEGIES") {
            Ok(raw) => parse_strategies(&raw)?,
            Err(_) => defaults.extraction.strategies,
        };

        Ok(Config {
            ocr: OcrConfig {
                tesseract_cmd: env::var_os("TESSERACT_CMD")
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from),
                language: env::var("OCR_LANGUAGE").unwrap_or(defaults.ocr.language),
                dpi: parse_var("OCR_DPI", defaults.ocr.dpi)?.clamp(MIN_DPI, MAX_DPI),
                detect_orientation: parse_bool_var(
                    "OCR_DETECT_ORIENTATION",
                    defaults.ocr.detect_orientation,
                )?,
                preprocess: parse_bool_var("OCR_PREPROCESS", defaults.ocr.preprocess)?,
            },
            extraction: ExtractionConfig {
                strategies,
                sentence_language: env::var("SENTENCE_LANGUAGE")
                    .unwrap_or(defaults.extraction.sentence_language),
            },
            index: IndexConfig {
                database_url: env::var("INDEX_DATABASE_URL")
                    .unwrap_or(defaults.index.database_url),
                processed_dir: env::var_os("INDEX_PROCESSED_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.index.processed_dir),
                min_sentence_len: parse_var(
                    "INDEX_MIN_SENTENCE_LEN",
                    defaults.index.min_sentence_len,
                )?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

fn parse_bool_var(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue { name, value }),
        },
        Err(_) => Ok(default),
    }
}

fn parse_strategies(raw: &str) -> Result<Vec<TextStrategy>, ConfigError> {
    let strategies = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|_| ConfigError::InvalidValue {
                name: "EXTRACT_STRATEGIES",
                value: raw.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if strategies.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: "EXTRACT_STRATEGIES",
            value: raw.to_string(),
        });
    }

    Ok(strategies)
}
