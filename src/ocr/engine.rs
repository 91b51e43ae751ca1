use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::{find_tessdata_dir, find_tesseract_executable};
use crate::config::AnalyzerConfig;

/// Recognition settings for one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OcrHint {
    /// Characters the recognizer may emit
    pub whitelist: &'static str,
    /// Page segmentation mode (7 = single text line)
    pub psm: u8,
    /// OCR engine mode, engine default when `None`
    pub oem: Option<u8>,
}

/// Accuracy percentage, e.g. "99.1234%"
pub const ACCURACY_HINT: OcrHint = OcrHint {
    whitelist: "0123456789.%",
    psm: 7,
    oem: None,
};
/// Lane count badge
pub const LINE_HINT: OcrHint = OcrHint {
    whitelist: "46",
    psm: 7,
    oem: None,
};
/// Level, score and judgement counts
pub const INTEGER_HINT: OcrHint = OcrHint {
    whitelist: "0123456789",
    psm: 7,
    oem: Some(1),
};
/// P.A.T.C.H. value, e.g. "395.14+"
pub const PATCH_HINT: OcrHint = OcrHint {
    whitelist: "0123456789.+",
    psm: 7,
    oem: None,
};

/// Text recognition service.
///
/// Implementations must return the same text for the same pixels and hint.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: &DynamicImage, hint: &OcrHint) -> Result<String>;
}

/// Runs the Tesseract command line on each crop.
#[derive(Clone, Debug)]
pub struct TesseractRecognizer {
    executable: PathBuf,
    tessdata: Option<PathBuf>,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(
        executable: PathBuf,
        tessdata: Option<PathBuf>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            executable,
            tessdata,
            language: language.into(),
        }
    }

    /// Locates Tesseract using the configured paths first.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        let executable = match &config.tesseract_path {
            Some(path) => path.clone(),
            None => find_tesseract_executable()?,
        };
        // Tesseract falls back to its compiled-in data path without one
        let tessdata = match &config.tessdata_dir {
            Some(dir) => Some(dir.clone()),
            None => find_tessdata_dir(&config.language).ok(),
        };

        crate::log(&format!("Using Tesseract at: {}", executable.display()));
        Ok(Self::new(executable, tessdata, config.language.clone()))
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, image: &DynamicImage, hint: &OcrHint) -> Result<String> {
        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        image
            .save(temp_input.path())
            .context("Failed to write OCR input image")?;

        let mut command = Command::new(&self.executable);
        command.arg(temp_input.path()).arg("stdout");
        if let Some(tessdata) = &self.tessdata {
            command.arg("--tessdata-dir").arg(tessdata);
        }
        command
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(hint.psm.to_string());
        if let Some(oem) = hint.oem {
            command.arg("--oem").arg(oem.to_string());
        }
        command
            .arg("-c")
            .arg(format!("tessedit_char_whitelist={}", hint.whitelist));

        let output = command.output().context("Failed to run Tesseract")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_use_single_line_mode() {
        for hint in [ACCURACY_HINT, LINE_HINT, INTEGER_HINT, PATCH_HINT] {
            assert_eq!(hint.psm, 7);
        }
        assert_eq!(INTEGER_HINT.oem, Some(1));
    }

    #[test]
    fn test_missing_executable_is_an_error() {
        let recognizer = TesseractRecognizer::new(
            PathBuf::from("/nonexistent/tesseract-binary"),
            None,
            "eng",
        );
        let img = DynamicImage::new_luma8(4, 4);
        assert!(recognizer.recognize(&img, &INTEGER_HINT).is_err());
    }
}
