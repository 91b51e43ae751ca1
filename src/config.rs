//! Analyzer configuration.
//!
//! Loads settings from config.json at startup. Provides the recognizer
//! location, preprocessing thresholds and the jacket match threshold.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<AnalyzerConfig> = OnceLock::new();

/// Complete analyzer configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Jacket match distance above which a report is flagged as uncertain
    pub phash_threshold: u32,
    /// Per-channel tolerance when matching the difficulty colour
    pub color_tolerance: u8,
    /// Luminance cut for integer fields (pixels brighter than this become white)
    pub binarize_threshold: u8,
    /// Upscale factor applied to integer fields before OCR
    pub upscale_factor: u32,
    /// Explicit tesseract executable, skips discovery when set
    pub tesseract_path: Option<PathBuf>,
    /// Explicit tessdata directory, skips discovery when set
    pub tessdata_dir: Option<PathBuf>,
    /// Tesseract language
    pub language: String,
    /// Save crops the integer reader could not parse into the debug directory
    pub save_failed_crops: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            phash_threshold: 5,
            color_tolerance: 5,
            // ~78% of full scale
            binarize_threshold: 200,
            upscale_factor: 4,
            tesseract_path: None,
            tessdata_dir: None,
            language: "eng".to_string(),
            save_failed_crops: false,
        }
    }
}

impl AnalyzerConfig {
    /// Loads configuration from `path`, or returns defaults if it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        crate::log(&format!("Looking for config at: {}", path.display()));

        if !path.exists() {
            crate::log("config.json not found. Using default config.");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log(&format!("Config loaded from {}", path.display()));
                    config
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse {}: {}. Using defaults.",
                        path.display(),
                        e
                    ));
                    Self::default()
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read {}: {}. Using defaults.",
                    path.display(),
                    e
                ));
                Self::default()
            }
        }
    }
}

/// Initializes the global configuration. Call once at startup.
///
/// Reads `path` when given, otherwise config.json next to the executable.
pub fn init_config(path: Option<&Path>) -> &'static AnalyzerConfig {
    CONFIG.get_or_init(|| match path {
        Some(path) => AnalyzerConfig::load(path),
        None => AnalyzerConfig::load(&crate::paths::get_config_path()),
    })
}

/// Returns the global configuration, or defaults if `init_config` was never called.
pub fn get_config() -> &'static AnalyzerConfig {
    CONFIG.get_or_init(AnalyzerConfig::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = AnalyzerConfig::load(&dir.path().join("config.json"));
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "phash_threshold": 8, "language": "kor" }"#).unwrap();

        let config = AnalyzerConfig::load(&path);
        assert_eq!(config.phash_threshold, 8);
        assert_eq!(config.language, "kor");
        assert_eq!(config.color_tolerance, 5);
        assert_eq!(config.binarize_threshold, 200);
        assert_eq!(config.upscale_factor, 4);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(AnalyzerConfig::load(&path), AnalyzerConfig::default());
    }
}
