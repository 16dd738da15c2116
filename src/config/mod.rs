//! Detector configuration: anchors, labels and thresholds.
//!
//! Everything the decoder needs besides the tensor itself is injected through
//! an immutable [`DetectorConfig`]. The defaults reproduce the three-class,
//! five-anchor deployment the decoder was first built for.

mod labels;

pub use labels::{ClassIndex, LabelSet};

use crate::util::{YoloDecodeError, YoloDecodeResult};

/// Anchor prior in grid-cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Width prior, multiplied by `exp(t_w)` and the stride.
    pub width: f64,
    /// Height prior, multiplied by `exp(t_h)` and the stride.
    pub height: f64,
}

impl Anchor {
    /// Creates an anchor from a `(width, height)` pair.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Default anchors, one per box slot.
pub const DEFAULT_ANCHORS: [Anchor; 5] = [
    Anchor::new(1.08, 1.19),
    Anchor::new(3.42, 4.41),
    Anchor::new(6.63, 11.38),
    Anchor::new(9.42, 5.11),
    Anchor::new(16.62, 10.52),
];

/// Default class names.
pub const DEFAULT_LABELS: [&str; 3] = ["robot", "redball", "blueball"];

/// Configuration for decoding, ranking and suppression.
#[derive(Clone, Debug)]
pub struct DetectorConfig {
    /// Number of classes predicted per box slot.
    pub num_classes: usize,
    /// Number of anchor slots per grid cell.
    pub num_boxes_per_block: usize,
    /// Anchor priors, one per box slot.
    pub anchors: Vec<Anchor>,
    /// Class names, one per class.
    pub labels: LabelSet,
    /// Pixels covered by one grid cell.
    pub stride: usize,
    /// Maximum number of detections kept after ranking.
    pub max_results: usize,
    /// Candidates must score strictly above this to leave the decoder.
    pub class_confidence_floor: f64,
    /// Candidates below this are dropped during suppression.
    pub nms_confidence_floor: f64,
    /// Overlaps strictly above this trigger suppression.
    pub nms_overlap_threshold: f64,
    /// Decode grid rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            num_classes: DEFAULT_LABELS.len(),
            num_boxes_per_block: DEFAULT_ANCHORS.len(),
            anchors: DEFAULT_ANCHORS.to_vec(),
            labels: LabelSet::new(DEFAULT_LABELS),
            stride: 32,
            max_results: 30,
            class_confidence_floor: 0.01,
            nms_confidence_floor: 0.2,
            nms_overlap_threshold: 0.6,
            parallel: false,
        }
    }
}

impl DetectorConfig {
    /// Replaces the anchors and updates `num_boxes_per_block` to match.
    pub fn with_anchors(mut self, anchors: impl Into<Vec<Anchor>>) -> Self {
        self.anchors = anchors.into();
        self.num_boxes_per_block = self.anchors.len();
        self
    }

    /// Replaces the labels and updates `num_classes` to match.
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.num_classes = labels.len();
        self.labels = labels;
        self
    }

    /// Sets the stride in pixels per grid cell.
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Sets the top-K bound.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Sets the decoder confidence floor.
    pub fn with_class_confidence_floor(mut self, floor: f64) -> Self {
        self.class_confidence_floor = floor;
        self
    }

    /// Sets the suppression confidence floor and overlap threshold.
    pub fn with_nms(mut self, confidence_floor: f64, overlap_threshold: f64) -> Self {
        self.nms_confidence_floor = confidence_floor;
        self.nms_overlap_threshold = overlap_threshold;
        self
    }

    /// Enables row-parallel decoding when the `rayon` feature is on.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of channels per box slot (`num_classes + 5`).
    pub fn channels_per_box(&self) -> usize {
        self.num_classes + 5
    }

    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> YoloDecodeResult<()> {
        if self.num_classes == 0 {
            return Err(YoloDecodeError::config("num_classes must be at least 1"));
        }
        if self.num_boxes_per_block == 0 {
            return Err(YoloDecodeError::config(
                "num_boxes_per_block must be at least 1",
            ));
        }
        if self.anchors.len() != self.num_boxes_per_block {
            return Err(YoloDecodeError::config(format!(
                "expected {} anchors, got {}",
                self.num_boxes_per_block,
                self.anchors.len()
            )));
        }
        if self.labels.len() != self.num_classes {
            return Err(YoloDecodeError::config(format!(
                "expected {} labels, got {}",
                self.num_classes,
                self.labels.len()
            )));
        }
        if self.stride == 0 {
            return Err(YoloDecodeError::config("stride must be positive"));
        }
        if self
            .anchors
            .iter()
            .any(|a| !a.width.is_finite() || !a.height.is_finite())
        {
            return Err(YoloDecodeError::config("anchor sizes must be finite"));
        }
        let thresholds = [
            self.class_confidence_floor,
            self.nms_confidence_floor,
            self.nms_overlap_threshold,
        ];
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(YoloDecodeError::config("thresholds must be finite"));
        }
        Ok(())
    }
}
