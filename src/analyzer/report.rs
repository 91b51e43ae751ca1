//! The analysis report handed to callers.

use image::RgbImage;
use serde::Serialize;
use std::fmt;

use crate::catalog::Song;
use crate::jacket::{PerceptualHash, NO_MATCH_DISTANCE};
use crate::scoring::{Difficulty, JudgementCounts, Rank};

/// Raw readings taken from the screenshot before any derivation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RecognizedFields {
    pub accuracy: f64,
    pub line: u32,
    pub level: u32,
    pub patch: f64,
    pub score: u32,
    pub total_notes: u32,
    /// Judgement counts as read, before reconciliation
    pub judgements: JudgementCounts,
    pub difficulty_rgb: [u8; 3],
}

/// Conditions the caller should surface next to the result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// Best jacket match is farther than the advisory threshold
    UncertainJacketMatch { distance: u32, threshold: u32 },
    /// The catalog had no jacket hashes to compare against
    NoSongMatched,
    /// The resolved level is not registered for the recognized chart
    LevelNotRegistered { level: u32 },
    /// Reconciliation produced a negative count, so more than one reading was wrong
    NegativeJudgementCount,
    /// Every judgement count was zero
    NoNotesRecognized,
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UncertainJacketMatch { distance, .. } => write!(
                f,
                "Jacket match distance {} is high. Result might be uncertain.",
                distance
            ),
            Self::NoSongMatched => write!(f, "No catalog jacket available. Song is unknown."),
            Self::LevelNotRegistered { level } => write!(
                f,
                "Level {} is NOT registered on DB. Result might be uncertain.",
                level
            ),
            Self::NegativeJudgementCount => write!(
                f,
                "Note counts did not reconcile (negative count). Result might be uncertain."
            ),
            Self::NoNotesRecognized => {
                write!(f, "No notes recognized. Accuracy could not be computed.")
            }
        }
    }
}

/// Result of analyzing one screenshot. Built once by the analyzer and never
/// modified afterwards.
#[derive(Clone, Debug)]
pub struct AnalysisReport {
    pub(crate) song: Option<Song>,
    pub(crate) score: i64,
    pub(crate) accuracy: f64,
    pub(crate) patch: f64,
    pub(crate) line: u32,
    pub(crate) difficulty: Difficulty,
    pub(crate) level: u32,
    pub(crate) jacket_image: RgbImage,
    pub(crate) jacket_hash: PerceptualHash,
    pub(crate) match_distance: u32,
    pub(crate) rank: Rank,
    pub(crate) judgements: JudgementCounts,
    pub(crate) is_full_combo: bool,
    pub(crate) is_perfect_decode: bool,
    pub(crate) recognized: RecognizedFields,
    pub(crate) warnings: Vec<ReportWarning>,
}

impl AnalysisReport {
    /// Matched catalog song, `None` when the catalog had nothing to match.
    pub fn song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Accuracy rate in percent, computed from the reconciled counts.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn patch(&self) -> f64 {
        self.patch
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn jacket_image(&self) -> &RgbImage {
        &self.jacket_image
    }

    pub fn jacket_hash(&self) -> PerceptualHash {
        self.jacket_hash
    }

    /// Hamming distance of the jacket match, [`NO_MATCH_DISTANCE`] without one.
    pub fn match_distance(&self) -> u32 {
        self.match_distance
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Reconciled judgement counts.
    pub fn judgements(&self) -> &JudgementCounts {
        &self.judgements
    }

    pub fn is_full_combo(&self) -> bool {
        self.is_full_combo
    }

    pub fn is_perfect_decode(&self) -> bool {
        self.is_perfect_decode
    }

    pub fn recognized(&self) -> &RecognizedFields {
        &self.recognized
    }

    pub fn warnings(&self) -> &[ReportWarning] {
        &self.warnings
    }

    pub fn is_uncertain(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            song_id: self.song.as_ref().map(|s| s.id),
            title: self.title().to_string(),
            artist: self.artist().to_string(),
            line: self.line,
            difficulty: self.difficulty,
            level: self.level,
            accuracy: self.accuracy,
            rank: self.rank,
            score: self.score,
            patch: self.patch,
            judgements: self.judgements,
            is_full_combo: self.is_full_combo,
            is_perfect_decode: self.is_perfect_decode,
            jacket_hash: self.jacket_hash,
            match_distance: (self.match_distance != NO_MATCH_DISTANCE)
                .then_some(self.match_distance),
            warnings: self.warnings.clone(),
        }
    }

    fn title(&self) -> &str {
        self.song.as_ref().map_or(UNKNOWN_SONG, |s| s.title.as_str())
    }

    fn artist(&self) -> &str {
        self.song.as_ref().map_or("", |s| s.artist.as_str())
    }
}

const UNKNOWN_SONG: &str = "UNKNOWN SONG";

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} - {} | {}L {} Lv.{}",
            self.title(),
            self.artist(),
            self.line,
            self.difficulty,
            self.level
        )?;

        write!(f, "Judge: {:.4}% ({})", self.accuracy, self.rank)?;
        if self.is_perfect_decode {
            write!(f, " [PERFECT DECODE]")?;
        } else if self.is_full_combo {
            write!(f, " [FULL COMBO]")?;
        }
        writeln!(f)?;

        writeln!(f, "Score: {}", self.score)?;
        write!(f, "P.A.T.C.H.: {:.2}", self.patch)
    }
}

/// Serializable view of a report, without the jacket image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportSummary {
    pub song_id: Option<u32>,
    pub title: String,
    pub artist: String,
    pub line: u32,
    pub difficulty: Difficulty,
    pub level: u32,
    pub accuracy: f64,
    pub rank: Rank,
    pub score: i64,
    pub patch: f64,
    pub judgements: JudgementCounts,
    pub is_full_combo: bool,
    pub is_perfect_decode: bool,
    pub jacket_hash: PerceptualHash,
    pub match_distance: Option<u32>,
    pub warnings: Vec<ReportWarning>,
}
