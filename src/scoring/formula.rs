use crate::error::ScoringError;

use super::judgement::JudgementCounts;
use super::rank::Rank;

/// Base multiplier of the P.A.T.C.H. formula.
const PATCH_LEVEL_FACTOR: f64 = 42.0;
/// Bonus applied to PLUS charts.
const PLUS_MULTIPLIER: f64 = 1.02;

/// Rounds to `places` decimals.
///
/// Rounds the exact binary value through the decimal formatter, so the
/// result is the closest decimal with ties going to even.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Accuracy rate in percent (0.0 to 100.0), rounded to 4 decimals.
///
/// PERFECT tiers weigh 100, GREAT 70, GOOD 30, MISS 0, divided by the note
/// count of `counts`.
pub fn accuracy_rate(counts: &JudgementCounts) -> Result<f64, ScoringError> {
    let total_notes = counts.sum();
    if total_notes == 0 {
        return Err(ScoringError::NoNotes);
    }

    let total_judge =
        (counts.perfect_high + counts.perfect) * 100 + counts.great * 70 + counts.good * 30;
    Ok(round_to(total_judge as f64 / total_notes as f64, 4))
}

/// In-game score. GOOD and MISS do not score.
pub fn score(counts: &JudgementCounts) -> i64 {
    200 * counts.perfect_high + 150 * counts.perfect + 100 * counts.great
}

/// Calculates the P.A.T.C.H. value, rounded to 2 decimals.
///
/// A rank without a ratio (the reserved `F`) is worth 0.0.
pub fn patch_value(level: u32, rank: Rank, is_plus: bool, accuracy: f64) -> f64 {
    let Some(rank_ratio) = rank.ratio() else {
        return 0.0;
    };

    let mut patch = level as f64 * PATCH_LEVEL_FACTOR * (accuracy / 100.0) * rank_ratio;
    if is_plus {
        patch *= PLUS_MULTIPLIER;
    }

    round_to(patch, 2)
}
