//! Candidate ranking and pruning.
//!
//! Includes a bounded Top-K collector and the confidence-ordered
//! non-maximum suppression pass applied to its output.

pub(crate) mod nms;
pub(crate) mod topk;

use crate::detection::Detection;

/// Anything that can be ranked by confidence and compared by overlap.
pub trait Candidate {
    /// Score used for ranking and suppression.
    fn confidence(&self) -> f32;

    /// Overlap ratio in `[0, 1]` against another candidate.
    fn overlap(&self, other: &Self) -> f64;
}

impl Candidate for Detection {
    fn confidence(&self) -> f32 {
        self.confidence
    }

    fn overlap(&self, other: &Self) -> f64 {
        self.bbox.overlap(&other.bbox)
    }
}
