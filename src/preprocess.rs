//! Packing of ARGB frame pixels into the detector's float input.
//!
//! Pixels arrive as packed `0xAARRGGBB` words, row-major. The detector
//! expects interleaved RGB (HWC) scaled to `[0, 1]`; alpha is ignored.

use crate::util::{YoloDecodeError, YoloDecodeResult};

/// Channels per pixel in the packed input.
pub const INPUT_CHANNELS: usize = 3;

/// Splits a packed ARGB pixel into normalized `[r, g, b]`.
#[inline]
pub fn unpack_argb(pixel: u32) -> [f32; 3] {
    [
        ((pixel >> 16) & 0xFF) as f32 / 255.0,
        ((pixel >> 8) & 0xFF) as f32 / 255.0,
        (pixel & 0xFF) as f32 / 255.0,
    ]
}

/// Packs `pixels` into a new interleaved RGB tensor.
pub fn argb_to_rgb_tensor(pixels: &[u32]) -> Vec<f32> {
    let mut out = vec![0.0f32; pixels.len() * INPUT_CHANNELS];
    for (dst, &pixel) in out.chunks_exact_mut(INPUT_CHANNELS).zip(pixels) {
        dst.copy_from_slice(&unpack_argb(pixel));
    }
    out
}

/// Packs `pixels` into `out`, which must hold `3 * pixels.len()` values.
pub fn argb_to_rgb_tensor_into(pixels: &[u32], out: &mut [f32]) -> YoloDecodeResult<()> {
    let expected = pixels.len() * INPUT_CHANNELS;
    if out.len() != expected {
        return Err(YoloDecodeError::ShapeMismatch {
            expected,
            got: out.len(),
        });
    }
    for (dst, &pixel) in out.chunks_exact_mut(INPUT_CHANNELS).zip(pixels) {
        dst.copy_from_slice(&unpack_argb(pixel));
    }
    Ok(())
}
