use serde::{Serialize, Serializer};
use std::fmt;

/// Result rank, best first. `F` is reserved by the game and never computed here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    SsPlus,
    Ss,
    SPlus,
    S,
    AaPlus,
    Aa,
    APlus,
    A,
    B,
    C,
    F,
}

/// Inclusive lower accuracy bound per rank, evaluated top to bottom.
pub const RANK_THRESHOLDS: [(f64, Rank); 9] = [
    (99.8, Rank::SsPlus),
    (99.5, Rank::Ss),
    (99.0, Rank::SPlus),
    (98.0, Rank::S),
    (97.0, Rank::AaPlus),
    (95.0, Rank::Aa),
    (90.0, Rank::APlus),
    (80.0, Rank::A),
    (70.0, Rank::B),
];

impl Rank {
    /// Highest rank whose threshold the accuracy reaches; `C` below all of them.
    pub fn from_accuracy(accuracy: f64) -> Self {
        RANK_THRESHOLDS
            .iter()
            .find(|(threshold, _)| accuracy >= *threshold)
            .map(|&(_, rank)| rank)
            .unwrap_or(Rank::C)
    }

    /// P.A.T.C.H. multiplier for this rank. `None` for `F`.
    pub fn ratio(self) -> Option<f64> {
        let ratio = match self {
            Self::SsPlus => 1.0,
            Self::Ss => 0.95,
            Self::SPlus => 0.9,
            Self::S => 0.8,
            Self::AaPlus => 0.7,
            Self::Aa => 0.6,
            Self::APlus => 0.5,
            Self::A => 0.4,
            Self::B => 0.3,
            Self::C => 0.2,
            Self::F => return None,
        };
        Some(ratio)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SsPlus => "SS+",
            Self::Ss => "SS",
            Self::SPlus => "S+",
            Self::S => "S",
            Self::AaPlus => "AA+",
            Self::Aa => "AA",
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
