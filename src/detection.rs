//! The detection record produced for each frame.

use std::sync::Arc;

use crate::config::ClassIndex;
use crate::geometry::BoundingBox;

/// A labeled, scored box decoded from one grid cell and anchor slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Tensor offset of the channel block this detection came from.
    pub id: usize,
    /// Class name.
    pub label: Arc<str>,
    /// Class the label was resolved from.
    pub class: ClassIndex,
    /// Objectness times class probability.
    pub confidence: f32,
    /// Location in image pixels.
    pub bbox: BoundingBox,
}

impl Detection {
    /// Overlap (IoU) between the boxes of two detections.
    pub fn overlap(&self, other: &Detection) -> f64 {
        self.bbox.overlap(&other.bbox)
    }
}
