//! Non-maximum suppression for confidence-sorted candidates.

use crate::candidate::Candidate;
use crate::trace::{enter_span, trace_event};

/// Suppression thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NmsParams {
    /// Candidates with confidence below this are dropped outright.
    pub confidence_floor: f64,
    /// Pairs overlapping strictly more than this compete.
    pub overlap_threshold: f64,
}

impl Default for NmsParams {
    fn default() -> Self {
        Self {
            confidence_floor: 0.2,
            overlap_threshold: 0.6,
        }
    }
}

/// Marks the candidates to drop, indexed by position.
///
/// Every candidate `i` above the floor is compared against every other
/// candidate `j`. When they overlap past the threshold, the less confident
/// one is marked; if `i` does not strictly win, it is marked and stops
/// comparing. Marked candidates still take part in later comparisons, and a
/// candidate below the floor is marked without comparing at all.
pub fn suppression_marks<T: Candidate>(candidates: &[T], params: NmsParams) -> Vec<bool> {
    let mut marked = vec![false; candidates.len()];

    for (i, current) in candidates.iter().enumerate() {
        let conf_i = current.confidence();
        if f64::from(conf_i) < params.confidence_floor {
            marked[i] = true;
            continue;
        }
        for (j, other) in candidates.iter().enumerate() {
            if j == i {
                continue;
            }
            if current.overlap(other) > params.overlap_threshold {
                if conf_i > other.confidence() {
                    marked[j] = true;
                } else {
                    marked[i] = true;
                    break;
                }
            }
        }
    }

    marked
}

/// Removes suppressed candidates, keeping the survivors in input order.
pub fn suppress<T: Candidate>(candidates: Vec<T>, params: NmsParams) -> Vec<T> {
    if candidates.is_empty() {
        return candidates;
    }

    enter_span!(stage, "suppress", candidates = candidates.len());
    let marked = suppression_marks(&candidates, params);
    let kept: Vec<T> = candidates
        .into_iter()
        .zip(marked)
        .filter_map(|(candidate, drop)| (!drop).then_some(candidate))
        .collect();

    trace_event!(stage, "suppress_kept", count = kept.len());
    kept
}
