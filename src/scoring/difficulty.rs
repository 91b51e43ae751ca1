use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart difficulty. `Unknown` is the sentinel for an unrecognized colour or
/// an unrecognized catalog value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Hard,
    Over,
    Plus,
    #[serde(other)]
    Unknown,
}

/// Reference badge colours, matched in this order.
pub const DIFFICULTY_COLORS: [(Difficulty, [u8; 3]); 4] = [
    (Difficulty::Easy, [254, 179, 26]),
    (Difficulty::Hard, [252, 109, 111]),
    (Difficulty::Over, [187, 99, 219]),
    (Difficulty::Plus, [69, 81, 141]),
];

/// Absorbs minor compression changes in the sampled pixel.
pub const DEFAULT_COLOR_TOLERANCE: u8 = 5;

impl Difficulty {
    pub fn is_plus(self) -> bool {
        self == Self::Plus
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Hard => "HARD",
            Self::Over => "OVER",
            Self::Plus => "PLUS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies the difficulty from the badge colour.
///
/// Every channel must be within `tolerance` of the reference. The first
/// matching reference wins; no match gives [`Difficulty::Unknown`].
pub fn classify_difficulty(rgb: [u8; 3], tolerance: u8) -> Difficulty {
    DIFFICULTY_COLORS
        .iter()
        .find(|(_, reference)| {
            rgb.iter()
                .zip(reference.iter())
                .all(|(&sample, &target)| sample.abs_diff(target) <= tolerance)
        })
        .map(|&(difficulty, _)| difficulty)
        .unwrap_or(Difficulty::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_reference_colours() {
        for (difficulty, rgb) in DIFFICULTY_COLORS {
            assert_eq!(
                classify_difficulty(rgb, DEFAULT_COLOR_TOLERANCE),
                difficulty
            );
        }
    }

    #[test]
    fn test_within_tolerance() {
        assert_eq!(classify_difficulty([254, 179, 31], 5), Difficulty::Easy);
        assert_eq!(classify_difficulty([249, 184, 21], 5), Difficulty::Easy);
        assert_eq!(classify_difficulty([64, 86, 136], 5), Difficulty::Plus);
    }

    #[test]
    fn test_outside_tolerance_is_unknown() {
        assert_eq!(classify_difficulty([254, 179, 32], 5), Difficulty::Unknown);
        assert_eq!(classify_difficulty([0, 0, 0], 5), Difficulty::Unknown);
    }

    #[test]
    fn test_zero_tolerance_needs_exact_match() {
        assert_eq!(classify_difficulty([187, 99, 219], 0), Difficulty::Over);
        assert_eq!(classify_difficulty([187, 99, 218], 0), Difficulty::Unknown);
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Over).unwrap(),
            "\"OVER\""
        );
        let parsed: Difficulty = serde_json::from_str("\"PLUS\"").unwrap();
        assert_eq!(parsed, Difficulty::Plus);
        let parsed: Difficulty = serde_json::from_str("\"EXTRA\"").unwrap();
        assert_eq!(parsed, Difficulty::Unknown);
    }
}
