//! Judgement counts and their reconciliation against the recognized total.

use serde::Serialize;

/// The five judgement buckets of a result screen.
///
/// Signed because reconciliation can push a field below zero when more than
/// one reading was wrong.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct JudgementCounts {
    pub perfect_high: i64,
    pub perfect: i64,
    pub great: i64,
    pub good: i64,
    pub miss: i64,
}

impl JudgementCounts {
    pub fn new(perfect_high: i64, perfect: i64, great: i64, good: i64, miss: i64) -> Self {
        Self {
            perfect_high,
            perfect,
            great,
            good,
            miss,
        }
    }

    pub fn sum(&self) -> i64 {
        self.perfect_high + self.perfect + self.great + self.good + self.miss
    }

    /// A negative count means reconciliation ran on more than one bad reading.
    pub fn has_negative(&self) -> bool {
        [self.perfect_high, self.perfect, self.great, self.good, self.miss]
            .iter()
            .any(|&count| count < 0)
    }
}

/// Corrects at most one misread count using the recognized total.
///
/// If the counts already add up they are returned unchanged. Otherwise the
/// first of perfect-high, perfect, great, good that alone exceeds the total is
/// recomputed from the other four; if none does, miss is recomputed.
///
/// This assumes a single wrong field and a trustworthy total. Multi-field
/// errors are not detected and can produce a negative count.
pub fn reconcile(total: i64, counts: JudgementCounts) -> JudgementCounts {
    if counts.sum() == total {
        return counts;
    }

    let mut fixed = counts;
    let JudgementCounts {
        perfect_high,
        perfect,
        great,
        good,
        miss,
    } = counts;

    if perfect_high > total {
        fixed.perfect_high = total - (perfect + great + good + miss);
    } else if perfect > total {
        fixed.perfect = total - (perfect_high + great + good + miss);
    } else if great > total {
        fixed.great = total - (perfect_high + perfect + good + miss);
    } else if good > total {
        fixed.good = total - (perfect_high + perfect + great + miss);
    } else {
        fixed.miss = total - (perfect_high + perfect + great + good);
    }

    fixed
}
