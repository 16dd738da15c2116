//! yolodecode turns the raw output of a grid-based, anchor-based object
//! detector (YOLO v2 style) into labeled, scored, non-overlapping boxes.
//!
//! A frame goes through three stages: the grid decoder turns each cell and
//! anchor slot into a candidate, a bounded Top-K keeps the most confident
//! ones, and non-maximum suppression removes overlapping duplicates.
//! [`Pipeline`] runs all three; [`Detector`] adds frame packing and an
//! external [`InferenceEngine`] in front of it. Row-parallel decoding is
//! available through the `rayon` feature.

mod candidate;
pub mod config;
pub mod decode;
mod detection;
pub mod engine;
pub mod geometry;
#[cfg(feature = "image-io")]
pub mod io;
pub mod lowlevel;
mod pipeline;
pub mod preprocess;
mod trace;
pub mod util;

pub use config::{Anchor, ClassIndex, DetectorConfig, LabelSet};
pub use detection::Detection;
pub use engine::{Detector, DetectorError, InferenceEngine, ModelIo};
pub use geometry::BoundingBox;
pub use pipeline::Pipeline;
pub use trace::StageTimer;
pub use util::math::{sigmoid, softmax};
pub use util::{YoloDecodeError, YoloDecodeResult};

pub use candidate::nms::{suppress, NmsParams};
pub use candidate::topk::{select_top_k, TopK};
pub use candidate::Candidate;
pub use decode::decode_grid;
