//! Rayon-parallel grid decoding (feature-gated).
//!
//! Rows are decoded independently with per-row scratch buffers and
//! concatenated in row order, so the output equals the scalar decoder's.

use crate::config::DetectorConfig;
use crate::decode::scalar::decode_row;
use crate::decode::TensorLayout;
use crate::detection::Detection;
use crate::util::YoloDecodeResult;
use rayon::prelude::*;

/// Row-parallel variant of the scalar decoder.
pub(crate) fn decode_rows_par(
    tensor: &[f32],
    layout: &TensorLayout,
    cfg: &DetectorConfig,
) -> YoloDecodeResult<Vec<Detection>> {
    let rows: Vec<Vec<Detection>> = (0..layout.grid_height)
        .into_par_iter()
        .map(|y| -> YoloDecodeResult<Vec<Detection>> {
            let mut scratch = vec![0.0f32; cfg.num_classes];
            let mut row = Vec::new();
            decode_row(tensor, layout, cfg, y, &mut scratch, &mut row)?;
            Ok(row)
        })
        .collect::<YoloDecodeResult<_>>()?;

    Ok(rows.into_iter().flatten().collect())
}
