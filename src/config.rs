//! Configuration types.
//!
//! Loads settings from config.json at startup. The loaded value is immutable
//! and passed explicitly to the parser and pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Lower-case tokens and phrases treated as organizational noise.
const DEFAULT_DROP_TOKENS: [&str; 22] = [
    "nm",
    "nm-",
    "members",
    "member",
    "elite",
    "officer",
    "president",
    "vice",
    "vice president",
    "hardcore",
    "casual",
    "active",
    "daily",
    "active daily",
    "active at night",
    "online",
    "ranking",
    "notice",
    "enter",
    "club",
    "tag",
    "state",
];

/// Knobs for line classification and name cleaning.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParserConfig {
    /// Exact (lower-case) lines and name tokens to discard
    pub drop_tokens: BTreeSet<String>,
    /// A numeric line needs at least this many digits to count as a power
    pub min_digits: usize,
    /// Powers below this floor are reported as suspects (null disables)
    pub strict_min_power: Option<u64>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            drop_tokens: DEFAULT_DROP_TOKENS.iter().map(|t| t.to_string()).collect(),
            min_digits: 6,
            strict_min_power: Some(3_000_000),
        }
    }
}

/// A rectangle in absolute pixels (ImageMagick `WxH+X+Y` geometry).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for PixelRect {
    /// Member list region of a full-size club screenshot.
    fn default() -> Self {
        Self {
            x: 447,
            y: 170,
            width: 417,
            height: 380,
        }
    }
}

/// Tesseract invocation settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TesseractConfig {
    /// Explicit path to the tesseract executable
    pub executable: Option<String>,
    /// Explicit tessdata directory
    pub tessdata_dir: Option<String>,
    /// Recognition language
    pub language: String,
    /// Page segmentation mode
    pub psm: u8,
    /// Lines with average word confidence below this are dropped (0-100)
    pub min_confidence: f32,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            executable: None,
            tessdata_dir: None,
            language: "eng".to_string(),
            psm: 6,
            min_confidence: 0.0,
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub parser: ParserConfig,
    /// Region cropped from each screenshot before OCR (null keeps the whole image)
    pub crop: Option<PixelRect>,
    /// Maximum number of inputs per run
    pub max_images: usize,
    pub tesseract: TesseractConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            crop: Some(PixelRect::default()),
            max_images: 16,
            tesseract: TesseractConfig::default(),
        }
    }
}

/// Loads configuration from the given path, falling back to defaults when
/// the file is missing or cannot be parsed.
pub fn load_config(config_path: &Path) -> AppConfig {
    crate::log(&format!("Looking for config at: {}", config_path.display()));

    if !config_path.exists() {
        crate::log("config.json not found. Using default config.");
        return AppConfig::default();
    }

    match fs::read_to_string(config_path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => {
                crate::log("Config loaded from config.json");
                config
            }
            Err(e) => {
                crate::log(&format!(
                    "Failed to parse config.json: {}. Using defaults.",
                    e
                ));
                AppConfig::default()
            }
        },
        Err(e) => {
            crate::log(&format!(
                "Failed to read config.json: {}. Using defaults.",
                e
            ));
            AppConfig::default()
        }
    }
}
