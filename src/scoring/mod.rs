//! Game scoring rules.
//!
//! This module provides:
//! - Note-count reconciliation against the recognized total
//! - Accuracy rate, score and P.A.T.C.H. arithmetic
//! - Rank and difficulty lookup tables
//! - Catalog-backed level resolution

pub mod difficulty;
pub mod formula;
pub mod judgement;
pub mod level;
pub mod rank;

pub use difficulty::{classify_difficulty, Difficulty, DEFAULT_COLOR_TOLERANCE, DIFFICULTY_COLORS};
pub use formula::{accuracy_rate, patch_value, round_to, score};
pub use judgement::{reconcile, JudgementCounts};
pub use level::resolve_level;
pub use rank::{Rank, RANK_THRESHOLDS};
