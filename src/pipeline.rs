//! Per-frame decode, rank and suppress pipeline.

use crate::candidate::nms::{suppress, NmsParams};
use crate::candidate::topk::select_top_k;
use crate::config::DetectorConfig;
use crate::decode::{decode_validated, TensorLayout};
use crate::detection::Detection;
use crate::trace::{enter_span, trace_event};
use crate::util::YoloDecodeResult;

/// Validated, immutable pipeline for one detector model.
///
/// `process` allocates its buffers per call, so one pipeline can be shared
/// by reference between callers.
#[derive(Clone, Debug)]
pub struct Pipeline {
    cfg: DetectorConfig,
}

impl Pipeline {
    /// Validates `cfg` and builds a pipeline around it.
    pub fn new(cfg: DetectorConfig) -> YoloDecodeResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    /// Tensor layout expected for a frame of the given size.
    pub fn layout(&self, image_width: usize, image_height: usize) -> TensorLayout {
        TensorLayout::new(&self.cfg, image_width, image_height)
    }

    /// Suppression thresholds derived from the configuration.
    pub fn nms_params(&self) -> NmsParams {
        NmsParams {
            confidence_floor: self.cfg.nms_confidence_floor,
            overlap_threshold: self.cfg.nms_overlap_threshold,
        }
    }

    /// Decodes `tensor` for an `image_width x image_height` frame and returns
    /// the ranked, suppressed detections.
    ///
    /// A tensor whose length does not match the frame's layout fails with
    /// `ShapeMismatch` before anything is decoded.
    pub fn process(
        &self,
        tensor: &[f32],
        image_width: usize,
        image_height: usize,
    ) -> YoloDecodeResult<Vec<Detection>> {
        enter_span!(frame, "pipeline", width = image_width, height = image_height);

        let candidates = decode_validated(tensor, image_width, image_height, &self.cfg)?;
        let ranked = select_top_k(candidates, self.cfg.max_results);
        let detections = suppress(ranked, self.nms_params());

        trace_event!(frame, "pipeline_detections", count = detections.len());
        Ok(detections)
    }
}
