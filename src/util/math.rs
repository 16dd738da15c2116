//! Activation helpers used by the grid decoder.
//!
//! Exponentials are evaluated in `f64` and narrowed to `f32`, so decoded
//! scores match detectors that run their post-processing in double precision.

/// Logistic sigmoid `1 / (1 + exp(-x))`.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    (1.0 / (1.0 + (-f64::from(x)).exp())) as f32
}

/// Numerically stable softmax over `values`, returning a new vector.
///
/// The maximum is subtracted before exponentiating. An empty slice yields an
/// empty vector.
pub fn softmax(values: &[f32]) -> Vec<f32> {
    let mut out = values.to_vec();
    softmax_in_place(&mut out);
    out
}

/// In-place variant of [`softmax`] for reusable scratch buffers.
pub fn softmax_in_place(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    for value in values.iter_mut() {
        *value = f64::from(*value - max).exp() as f32;
        sum += *value;
    }
    for value in values.iter_mut() {
        *value /= sum;
    }
}

/// Index of the first maximum in `values`.
///
/// A later element only replaces the running maximum when it is strictly
/// greater, so ties resolve to the lowest index.
pub fn argmax_first(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &value) in values.iter().enumerate() {
        match best {
            Some((_, max)) if value <= max => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}
