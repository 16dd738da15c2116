//! Convenience helpers for loading detector input via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::preprocess::INPUT_CHANNELS;
use crate::util::{YoloDecodeError, YoloDecodeResult};
use std::path::Path;

/// Normalized RGB input tensor with its frame size.
#[derive(Clone, Debug, PartialEq)]
pub struct InputTensor {
    /// Interleaved RGB values in `[0, 1]`.
    pub data: Vec<f32>,
    /// Frame width in pixels.
    pub width: usize,
    /// Frame height in pixels.
    pub height: usize,
}

/// Converts an RGB image to the detector's interleaved float input.
pub fn tensor_from_rgb_image(img: &image::RgbImage) -> InputTensor {
    let data = img
        .as_raw()
        .iter()
        .map(|&v| f32::from(v) / 255.0)
        .collect::<Vec<_>>();
    debug_assert_eq!(data.len(), img.width() as usize * img.height() as usize * INPUT_CHANNELS);
    InputTensor {
        data,
        width: img.width() as usize,
        height: img.height() as usize,
    }
}

/// Packs an RGB image into `0xFFRRGGBB` words for [`crate::Detector`].
pub fn argb_from_rgb_image(img: &image::RgbImage) -> Vec<u32> {
    img.pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            0xFF00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
        })
        .collect()
}

/// Loads an image from disk and converts it to an input tensor.
pub fn load_input_tensor<P: AsRef<Path>>(path: P) -> YoloDecodeResult<InputTensor> {
    let img = image::open(path).map_err(|err| YoloDecodeError::ImageIo {
        reason: err.to_string(),
    })?;
    Ok(tensor_from_rgb_image(&img.to_rgb8()))
}
