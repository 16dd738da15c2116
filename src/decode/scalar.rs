//! Scalar reference decoder.

use crate::config::DetectorConfig;
use crate::decode::TensorLayout;
use crate::detection::Detection;
use crate::geometry::BoundingBox;
use crate::util::math::{argmax_first, sigmoid, softmax_in_place};
use crate::util::{YoloDecodeError, YoloDecodeResult};

/// Decodes all rows in order.
pub(crate) fn decode_rows(
    tensor: &[f32],
    layout: &TensorLayout,
    cfg: &DetectorConfig,
) -> YoloDecodeResult<Vec<Detection>> {
    let mut out = Vec::new();
    let mut scratch = vec![0.0f32; cfg.num_classes];
    for y in 0..layout.grid_height {
        decode_row(tensor, layout, cfg, y, &mut scratch, &mut out)?;
    }
    Ok(out)
}

/// Decodes grid row `y`, appending candidates to `out`.
///
/// `scratch` must hold `num_classes` values; it is overwritten per slot.
pub(crate) fn decode_row(
    tensor: &[f32],
    layout: &TensorLayout,
    cfg: &DetectorConfig,
    y: usize,
    scratch: &mut [f32],
    out: &mut Vec<Detection>,
) -> YoloDecodeResult<()> {
    let stride = cfg.stride as f32;
    for x in 0..layout.grid_width {
        for (b, anchor) in cfg.anchors.iter().enumerate() {
            let offset = layout.offset(x, y, b);
            let block = tensor
                .get(offset..offset + layout.channels)
                .ok_or(YoloDecodeError::ShapeMismatch {
                    expected: layout.expected_len(),
                    got: tensor.len(),
                })?;

            let cx = (x as f32 + sigmoid(block[0])) * stride;
            let cy = (y as f32 + sigmoid(block[1])) * stride;
            let w = (f64::from(block[2]).exp() * anchor.width) as f32 * stride;
            let h = (f64::from(block[3]).exp() * anchor.height) as f32 * stride;
            let objectness = sigmoid(block[4]);

            scratch.copy_from_slice(&block[5..]);
            softmax_in_place(scratch);
            let Some(best) = argmax_first(scratch) else {
                continue;
            };
            let confidence = scratch[best] * objectness;
            // NaN scores fail this comparison and are dropped with the rest.
            let keep = f64::from(confidence) > cfg.class_confidence_floor;
            if !keep {
                continue;
            }

            let class = cfg.labels.class_index(best)?;
            out.push(Detection {
                id: offset,
                label: cfg.labels.label(class)?,
                class,
                confidence,
                bbox: BoundingBox::from_center_clamped(
                    cx,
                    cy,
                    w,
                    h,
                    layout.image_width,
                    layout.image_height,
                ),
            });
        }
    }
    Ok(())
}
