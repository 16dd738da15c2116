//! Shared helpers for building detector output tensors and detections.

#![allow(dead_code)]

use std::sync::Arc;

use yolodecode::lowlevel::TensorLayout;
use yolodecode::{BoundingBox, ClassIndex, Detection, DetectorConfig};

/// Logit that keeps a slot far below every default floor.
pub const BACKGROUND_OBJECTNESS: f32 = -10.0;

/// Tensor for `cfg` at the given frame size, every slot set to background.
pub fn background_tensor(cfg: &DetectorConfig, width: usize, height: usize) -> (TensorLayout, Vec<f32>) {
    let layout = TensorLayout::new(cfg, width, height);
    let mut tensor = vec![0.0f32; layout.expected_len()];
    for y in 0..layout.grid_height {
        for x in 0..layout.grid_width {
            for b in 0..layout.boxes_per_block {
                tensor[layout.offset(x, y, b) + 4] = BACKGROUND_OBJECTNESS;
            }
        }
    }
    (layout, tensor)
}

/// Writes one slot: box offsets, objectness logit and class logits.
pub fn set_slot(
    tensor: &mut [f32],
    layout: &TensorLayout,
    cell: (usize, usize),
    slot: usize,
    coords: [f32; 4],
    objectness: f32,
    classes: &[f32],
) {
    let offset = layout.offset(cell.0, cell.1, slot);
    tensor[offset..offset + 4].copy_from_slice(&coords);
    tensor[offset + 4] = objectness;
    tensor[offset + 5..offset + 5 + classes.len()].copy_from_slice(classes);
}

/// Detection with the given id, confidence and box, labeled as class 0.
pub fn detection(id: usize, confidence: f32, bbox: BoundingBox) -> Detection {
    Detection {
        id,
        label: Arc::from("robot"),
        class: ClassIndex::new(0, 3).unwrap(),
        confidence,
        bbox,
    }
}
