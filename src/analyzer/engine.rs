//! Screenshot analysis: one screenshot in, one [`AnalysisReport`] out.

use anyhow::Result;
use image::{DynamicImage, RgbImage};
use std::path::PathBuf;
use std::sync::Arc;

use super::report::{AnalysisReport, RecognizedFields, ReportWarning};
use crate::catalog::Song;
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzeError, ScoringError};
use crate::jacket::{DctHasher, ImageHasher, JacketIndex, NO_MATCH_DISTANCE};
use crate::layout::{crop_field, pixel_rgb, sample_field, Field};
use crate::log;
use crate::ocr::{
    read_accuracy, read_integer, read_line_count, read_patch, Recognizer, TesseractRecognizer,
};
use crate::scoring::{
    accuracy_rate, classify_difficulty, patch_value, reconcile, resolve_level, score,
    JudgementCounts, Rank,
};

/// Where the screenshot comes from.
#[derive(Clone, Debug)]
pub enum ScreenshotSource {
    File(PathBuf),
    /// Image already taken from the clipboard; `None` when it held no image
    Clipboard(Option<DynamicImage>),
}

impl ScreenshotSource {
    pub fn load(self) -> Result<DynamicImage, AnalyzeError> {
        match self {
            Self::File(path) => {
                if !path.is_file() {
                    return Err(AnalyzeError::FileNotFound(path));
                }
                image::open(&path).map_err(|source| AnalyzeError::Decode { path, source })
            }
            Self::Clipboard(image) => image.ok_or(AnalyzeError::NoImage),
        }
    }
}

/// Recognizes result screenshots against a fixed catalog.
///
/// The catalog and its jacket index are read-only for the lifetime of the
/// analyzer. A catalog refresh builds a new analyzer with [`Self::rebuild`].
pub struct ScreenshotAnalyzer {
    songs: Vec<Song>,
    index: JacketIndex,
    recognizer: Arc<dyn Recognizer>,
    hasher: Arc<dyn ImageHasher>,
    config: AnalyzerConfig,
}

impl ScreenshotAnalyzer {
    pub fn new(
        songs: Vec<Song>,
        recognizer: Arc<dyn Recognizer>,
        hasher: Arc<dyn ImageHasher>,
        config: AnalyzerConfig,
    ) -> Self {
        let index = JacketIndex::build(&songs);
        log(&format!(
            "Analyzer ready: {} songs, {} jacket hashes",
            songs.len(),
            index.len()
        ));
        Self {
            songs,
            index,
            recognizer,
            hasher,
            config,
        }
    }

    /// Analyzer backed by the Tesseract CLI and the DCT hasher.
    pub fn with_tesseract(songs: Vec<Song>, config: AnalyzerConfig) -> Result<Self> {
        let recognizer = TesseractRecognizer::from_config(&config)?;
        Ok(Self::new(songs, Arc::new(recognizer), Arc::new(DctHasher), config))
    }

    /// New analyzer over a refreshed catalog, sharing this one's services.
    pub fn rebuild(&self, songs: Vec<Song>) -> Self {
        Self::new(
            songs,
            Arc::clone(&self.recognizer),
            Arc::clone(&self.hasher),
            self.config.clone(),
        )
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn extract_info(&self, source: ScreenshotSource) -> Result<AnalysisReport, AnalyzeError> {
        let image = source.load()?;
        Ok(self.analyze_image(&image))
    }

    /// Reads every field of the screenshot and derives the result.
    ///
    /// Never fails: unreadable fields fall back to their defaults and the
    /// report carries warnings instead.
    pub fn analyze_image(&self, image: &DynamicImage) -> AnalysisReport {
        let screenshot = image.to_rgb8();
        let mut warnings = Vec::new();

        // Jacket
        let jacket_image = crop_field(&screenshot, Field::Jacket);
        let jacket_hash = self
            .hasher
            .hash(&DynamicImage::ImageRgb8(jacket_image.clone()));
        let (matched, match_distance) = self.index.best_match(jacket_hash);
        let song = matched.and_then(|idx| self.songs.get(idx));

        if song.is_none() {
            warnings.push(ReportWarning::NoSongMatched);
        } else if match_distance != NO_MATCH_DISTANCE
            && match_distance > self.config.phash_threshold
        {
            warnings.push(ReportWarning::UncertainJacketMatch {
                distance: match_distance,
                threshold: self.config.phash_threshold,
            });
        }

        // Text fields
        let recognizer = self.recognizer.as_ref();
        let read_count = |field: Field| i64::from(self.read_field(&screenshot, field, false));

        let recognized_counts = JudgementCounts::new(
            read_count(Field::PerfectHigh),
            read_count(Field::Perfect),
            read_count(Field::Great),
            read_count(Field::Good),
            read_count(Field::Miss),
        );
        let total_notes = self.read_field(&screenshot, Field::TotalNotes, false);

        let recognized = RecognizedFields {
            accuracy: read_accuracy(&crop_field(&screenshot, Field::Judge), recognizer),
            line: read_line_count(&crop_field(&screenshot, Field::Line), recognizer),
            level: self.read_field(&screenshot, Field::Level, true),
            patch: read_patch(&crop_field(&screenshot, Field::Patch), recognizer),
            score: self.read_field(&screenshot, Field::Score, false),
            total_notes,
            judgements: recognized_counts,
            difficulty_rgb: sample_field(&screenshot, Field::DifficultyColor, pixel_rgb),
        };

        // Derivation
        let judgements = reconcile(i64::from(total_notes), recognized_counts);
        if judgements.has_negative() {
            warnings.push(ReportWarning::NegativeJudgementCount);
        }

        let accuracy = match accuracy_rate(&judgements) {
            Ok(rate) => rate,
            Err(ScoringError::NoNotes) => {
                warnings.push(ReportWarning::NoNotesRecognized);
                0.0
            }
        };

        let difficulty =
            classify_difficulty(recognized.difficulty_rgb, self.config.color_tolerance);
        let line = recognized.line;
        let level = resolve_level(song, line, difficulty, recognized.level);
        if let Some(song) = song {
            if !song.is_level_registered(line, difficulty, level) {
                warnings.push(ReportWarning::LevelNotRegistered { level });
            }
        }

        // The catalog override only changes the reported level
        let rank = Rank::from_accuracy(accuracy);
        let patch = patch_value(recognized.level, rank, difficulty.is_plus(), accuracy);

        log(&format!(
            "Analyzed: song={} distance={} {}L {} Lv.{} judge={:.4}% patch={:.2}",
            song.map_or("none".to_string(), |s| s.id.to_string()),
            match_distance,
            line,
            difficulty,
            level,
            accuracy,
            patch
        ));

        AnalysisReport {
            song: song.cloned(),
            score: score(&judgements),
            accuracy,
            patch,
            line,
            difficulty,
            level,
            jacket_image,
            jacket_hash,
            match_distance,
            rank,
            judgements,
            is_full_combo: judgements.miss == 0,
            is_perfect_decode: accuracy == 100.0,
            recognized,
            warnings,
        }
    }

    fn read_field(&self, screenshot: &RgbImage, field: Field, invert: bool) -> u32 {
        read_integer(
            &crop_field(screenshot, field),
            self.recognizer.as_ref(),
            field,
            invert,
            &self.config,
        )
    }
}
