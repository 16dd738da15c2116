//! Low-level building blocks for custom post-processing.
//!
//! These expose the individual stages behind [`crate::Pipeline`] for callers
//! that want to rank or suppress their own candidates. Most users should
//! prefer `Pipeline` or `Detector`.

pub use crate::candidate::nms::{suppress, suppression_marks, NmsParams};
pub use crate::candidate::topk::{select_top_k, TopK};
pub use crate::candidate::Candidate;
pub use crate::decode::{decode_grid, TensorLayout};
pub use crate::preprocess::{argb_to_rgb_tensor, argb_to_rgb_tensor_into, unpack_argb};
pub use crate::util::math::{argmax_first, sigmoid, softmax, softmax_in_place};
