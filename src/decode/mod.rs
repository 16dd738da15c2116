//! Grid decoding of raw detector output into candidate detections.
//!
//! The detector emits one channel block per grid cell and anchor slot:
//! `[tx, ty, tw, th, objectness, class logits...]`. Blocks are laid out
//! row-major over cells with the anchor slots of a cell stored contiguously,
//! see [`TensorLayout::offset`].

pub(crate) mod scalar;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;

use crate::config::DetectorConfig;
use crate::detection::Detection;
use crate::trace::{enter_span, trace_event};
use crate::util::{YoloDecodeError, YoloDecodeResult};

/// Grid geometry derived from an image size and the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TensorLayout {
    /// Cells per row (`image_width / stride`).
    pub grid_width: usize,
    /// Cells per column (`image_height / stride`).
    pub grid_height: usize,
    /// Anchor slots per cell.
    pub boxes_per_block: usize,
    /// Channels per anchor slot (`num_classes + 5`).
    pub channels: usize,
    /// Source image width in pixels.
    pub image_width: usize,
    /// Source image height in pixels.
    pub image_height: usize,
}

impl TensorLayout {
    /// Derives the layout for an image of `image_width x image_height`.
    pub fn new(cfg: &DetectorConfig, image_width: usize, image_height: usize) -> Self {
        let stride = cfg.stride.max(1);
        Self {
            grid_width: image_width / stride,
            grid_height: image_height / stride,
            boxes_per_block: cfg.num_boxes_per_block,
            channels: cfg.channels_per_box(),
            image_width,
            image_height,
        }
    }

    /// Start of the channel block for cell `(x, y)` and anchor slot `b`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize, b: usize) -> usize {
        let block = self.boxes_per_block * self.channels;
        (self.grid_width * block) * y + block * x + self.channels * b
    }

    /// Number of values in one grid row, or `None` if it overflows `usize`.
    pub fn row_len(&self) -> Option<usize> {
        self.grid_width
            .checked_mul(self.boxes_per_block)?
            .checked_mul(self.channels)
    }

    /// Tensor length implied by the layout, or `None` if it overflows `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.row_len()?.checked_mul(self.grid_height)
    }

    /// Tensor length implied by the layout, saturating at `usize::MAX`.
    ///
    /// No slice of `f32` can be that long, so a saturated layout never
    /// passes [`check_len`](Self::check_len).
    pub fn expected_len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// Fails with `ShapeMismatch` unless `len` matches the layout.
    ///
    /// Once this passes, every [`offset`](Self::offset) inside the grid is
    /// in bounds and free of overflow.
    pub fn check_len(&self, len: usize) -> YoloDecodeResult<()> {
        match self.checked_len() {
            Some(expected) if expected == len => Ok(()),
            expected => Err(YoloDecodeError::ShapeMismatch {
                expected: expected.unwrap_or(usize::MAX),
                got: len,
            }),
        }
    }
}

/// Decodes every cell and anchor slot of `tensor` into candidates.
///
/// Only candidates scoring strictly above the class confidence floor are
/// returned. The output carries no ranking; callers sort it.
pub fn decode_grid(
    tensor: &[f32],
    image_width: usize,
    image_height: usize,
    cfg: &DetectorConfig,
) -> YoloDecodeResult<Vec<Detection>> {
    cfg.validate()?;
    decode_validated(tensor, image_width, image_height, cfg)
}

/// [`decode_grid`] for a configuration the caller has already validated.
pub(crate) fn decode_validated(
    tensor: &[f32],
    image_width: usize,
    image_height: usize,
    cfg: &DetectorConfig,
) -> YoloDecodeResult<Vec<Detection>> {
    let layout = TensorLayout::new(cfg, image_width, image_height);
    layout.check_len(tensor.len())?;

    enter_span!(
        stage,
        "decode_grid",
        grid_width = layout.grid_width,
        grid_height = layout.grid_height
    );

    let candidates = decode_rows(tensor, &layout, cfg)?;

    trace_event!(stage, "decoded_candidates", count = candidates.len());
    Ok(candidates)
}

#[cfg(feature = "rayon")]
fn decode_rows(
    tensor: &[f32],
    layout: &TensorLayout,
    cfg: &DetectorConfig,
) -> YoloDecodeResult<Vec<Detection>> {
    if cfg.parallel {
        self::rayon::decode_rows_par(tensor, layout, cfg)
    } else {
        scalar::decode_rows(tensor, layout, cfg)
    }
}

#[cfg(not(feature = "rayon"))]
fn decode_rows(
    tensor: &[f32],
    layout: &TensorLayout,
    cfg: &DetectorConfig,
) -> YoloDecodeResult<Vec<Detection>> {
    scalar::decode_rows(tensor, layout, cfg)
}
