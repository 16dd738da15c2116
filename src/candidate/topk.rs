//! Top-K selection by descending confidence.

use std::cmp::Ordering;

use crate::candidate::Candidate;
use crate::trace::{enter_span, trace_event};

/// Orders by descending confidence, then by arrival.
fn ranked_cmp<T: Candidate>(a: &(usize, T), b: &(usize, T)) -> Ordering {
    b.1.confidence()
        .total_cmp(&a.1.confidence())
        .then_with(|| a.0.cmp(&b.0))
}

/// Top-K container with O(k) insertion cost.
///
/// Items are tagged with their arrival index so equal confidences keep the
/// order they were pushed in.
pub struct TopK<T> {
    k: usize,
    seen: usize,
    items: Vec<(usize, T)>,
}

impl<T: Candidate> TopK<T> {
    /// Creates a collector that keeps at most `k` items.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seen: 0,
            items: Vec::with_capacity(k),
        }
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when nothing has been kept.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes an item, evicting the lowest ranked one if at capacity.
    pub fn push(&mut self, item: T) {
        let entry = (self.seen, item);
        self.seen += 1;
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(entry);
            return;
        }

        let mut worst_idx = 0usize;
        for (idx, held) in self.items.iter().enumerate().skip(1) {
            if ranked_cmp(held, &self.items[worst_idx]) == Ordering::Greater {
                worst_idx = idx;
            }
        }

        if ranked_cmp(&entry, &self.items[worst_idx]) == Ordering::Less {
            self.items[worst_idx] = entry;
        }
    }

    /// Returns the kept items sorted by descending confidence.
    pub fn into_sorted_desc(mut self) -> Vec<T> {
        self.items.sort_by(ranked_cmp);
        self.items.into_iter().map(|(_, item)| item).collect()
    }
}

impl<T: Candidate> Extend<T> for TopK<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// Returns the `min(k, n)` highest-confidence candidates, best first.
pub fn select_top_k<T, I>(candidates: I, k: usize) -> Vec<T>
where
    T: Candidate,
    I: IntoIterator<Item = T>,
{
    enter_span!(stage, "select_top_k", k = k);
    let mut topk = TopK::new(k);
    topk.extend(candidates);
    trace_event!(stage, "top_k_kept", seen = topk.seen, kept = topk.len());
    topk.into_sorted_desc()
}
