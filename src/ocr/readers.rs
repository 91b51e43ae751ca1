//! Per-field OCR readers.
//!
//! Every reader returns a usable value: unreadable text falls back to a fixed
//! default instead of failing the analysis. The text rules live in the
//! `parse_*` functions so they can be checked without an OCR engine.

use chrono::Local;
use image::{DynamicImage, GrayImage, RgbImage};

use super::engine::{OcrHint, Recognizer, ACCURACY_HINT, INTEGER_HINT, LINE_HINT, PATCH_HINT};
use super::preprocess::prepare_integer_crop;
use crate::config::AnalyzerConfig;
use crate::layout::Field;
use crate::log;

/// Lane count assumed when the badge cannot be read (the common mode).
pub const DEFAULT_LINE_COUNT: u32 = 6;

/// Parses an accuracy reading like "99.1234%". Returns 0.0 when unreadable.
pub fn parse_accuracy(text: &str) -> f64 {
    let cleaned = text.trim().replace('%', "");
    parse_finite(cleaned.trim()).unwrap_or(0.0)
}

/// Parses the lane count. Returns 6 when unreadable.
pub fn parse_line_count(text: &str) -> u32 {
    text.trim().parse().unwrap_or(DEFAULT_LINE_COUNT)
}

/// Parses a digits-only reading.
pub fn parse_integer(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// Parses a P.A.T.C.H. reading like "395.14+". Returns 0.0 when unreadable.
///
/// OCR tends to drop the small decimal point glyph, so a reading of three or
/// more characters without one gets a point inserted before the last two.
pub fn parse_patch(text: &str) -> f64 {
    let mut cleaned = text.trim().replace('+', "").trim().to_string();

    if !cleaned.contains('.') && cleaned.chars().count() >= 3 {
        if let Some((split, _)) = cleaned.char_indices().rev().nth(1) {
            cleaned.insert(split, '.');
        }
    }

    parse_finite(&cleaned).unwrap_or(0.0)
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Runs the recognizer, treating a recognizer failure as empty text.
fn recognize_text(recognizer: &dyn Recognizer, image: &DynamicImage, hint: &OcrHint) -> String {
    match recognizer.recognize(image, hint) {
        Ok(text) => text,
        Err(e) => {
            log(&format!("OCR failed: {}", e));
            String::new()
        }
    }
}

pub fn read_accuracy(crop: &RgbImage, recognizer: &dyn Recognizer) -> f64 {
    let image = DynamicImage::ImageRgb8(crop.clone());
    parse_accuracy(&recognize_text(recognizer, &image, &ACCURACY_HINT))
}

pub fn read_line_count(crop: &RgbImage, recognizer: &dyn Recognizer) -> u32 {
    let image = DynamicImage::ImageRgb8(crop.clone());
    parse_line_count(&recognize_text(recognizer, &image, &LINE_HINT))
}

pub fn read_patch(crop: &RgbImage, recognizer: &dyn Recognizer) -> f64 {
    let image = DynamicImage::ImageRgb8(crop.clone());
    parse_patch(&recognize_text(recognizer, &image, &PATCH_HINT))
}

/// Reads an integer field (level, score, note counts).
///
/// The crop is upscaled and binarized first, inverted when `invert` is set.
/// An unreadable value returns 0 and is logged, since a zero level or score
/// matters more than a zero judgement count. The prepared crop is saved to the
/// debug directory when `save_failed_crops` is enabled.
pub fn read_integer(
    crop: &RgbImage,
    recognizer: &dyn Recognizer,
    field: Field,
    invert: bool,
    config: &AnalyzerConfig,
) -> u32 {
    let prepared = prepare_integer_crop(
        crop,
        config.upscale_factor,
        config.binarize_threshold,
        invert,
    );
    let image = DynamicImage::ImageLuma8(prepared);
    let text = recognize_text(recognizer, &image, &INTEGER_HINT);

    match parse_integer(&text) {
        Some(value) => value,
        None => {
            log(&format!(
                "Error when converting the {} text to a number: '{}'",
                field, text
            ));
            if config.save_failed_crops {
                if let DynamicImage::ImageLuma8(gray) = &image {
                    save_failed_crop(gray, field);
                }
            }
            0
        }
    }
}

fn save_failed_crop(img: &GrayImage, field: Field) {
    let dir = crate::paths::get_debug_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        log(&format!("Failed to create debug dir {}: {}", dir.display(), e));
        return;
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S%.3f");
    let path = dir.join(format!("failed_{}_{}.png", field, timestamp));
    match img.save(&path) {
        Ok(()) => log(&format!("Saved unreadable crop: {}", path.display())),
        Err(e) => log(&format!("Failed to save crop {}: {}", path.display(), e)),
    }
}
