//! Inference engine seam and the frame-level detector built on it.
//!
//! The engine that actually runs the network is external. [`Detector`] packs
//! a frame, drives the engine through feed, run and fetch, then hands the
//! fetched tensor to a [`Pipeline`].

use thiserror::Error;

use crate::detection::Detection;
use crate::pipeline::Pipeline;
use crate::preprocess::{argb_to_rgb_tensor_into, INPUT_CHANNELS};
use crate::trace::{enter_span, trace_event, StageTimer};
use crate::util::{YoloDecodeError, YoloDecodeResult};

/// Interface of the engine that produces the raw detector output.
pub trait InferenceEngine {
    /// Engine failure, returned to callers unchanged.
    type Error: std::error::Error + 'static;

    /// Copies `data` with shape `dims` into the input tensor `input_name`.
    fn feed(&mut self, input_name: &str, data: &[f32], dims: &[usize]) -> Result<(), Self::Error>;

    /// Runs the graph up to `output_names`.
    fn run(&mut self, output_names: &[String], collect_stats: bool) -> Result<(), Self::Error>;

    /// Returns the flat contents of `output_name` after a successful run.
    fn fetch(&mut self, output_name: &str) -> Result<Vec<f32>, Self::Error>;

    /// Human readable statistics from previous runs.
    fn stats_summary(&self) -> String;

    /// Releases engine resources.
    fn release(&mut self);
}

/// Errors from [`Detector::recognize`].
#[derive(Debug, Error)]
pub enum DetectorError<E: std::error::Error + 'static> {
    /// The inference engine failed; the frame produced no output.
    #[error("inference engine failure: {0}")]
    Engine(#[source] E),
    /// Packing or decoding failed.
    #[error(transparent)]
    Decode(#[from] YoloDecodeError),
}

/// Tensor names and input geometry of a model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelIo {
    /// Name of the input tensor.
    pub input_name: String,
    /// Output tensors to run; the first is decoded.
    pub output_names: Vec<String>,
    /// Side length of the square input frame in pixels.
    pub input_size: usize,
}

impl ModelIo {
    /// Builds the io description, splitting `output_names` on commas.
    pub fn new(input_name: &str, output_names: &str, input_size: usize) -> YoloDecodeResult<Self> {
        let output_names: Vec<String> = output_names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        if output_names.is_empty() {
            return Err(YoloDecodeError::config("at least one output name is required"));
        }
        if input_size == 0 {
            return Err(YoloDecodeError::config("input_size must be positive"));
        }
        if input_size
            .checked_mul(input_size)
            .and_then(|pixels| pixels.checked_mul(INPUT_CHANNELS))
            .is_none()
        {
            return Err(YoloDecodeError::config(format!(
                "input_size {input_size} is too large"
            )));
        }
        Ok(Self {
            input_name: input_name.to_string(),
            output_names,
            input_size,
        })
    }

    /// Input shape fed to the engine: `[1, size, size, 3]`.
    pub fn input_dims(&self) -> [usize; 4] {
        [1, self.input_size, self.input_size, INPUT_CHANNELS]
    }
}

/// Runs an engine and the decode pipeline for square ARGB frames.
pub struct Detector<E> {
    engine: E,
    pipeline: Pipeline,
    io: ModelIo,
    log_stats: bool,
    input: Vec<f32>,
}

impl<E: InferenceEngine> Detector<E> {
    /// Wraps `engine` with a pipeline and the model's io description.
    pub fn new(engine: E, pipeline: Pipeline, io: ModelIo) -> Self {
        let input = vec![0.0f32; io.input_size * io.input_size * INPUT_CHANNELS];
        Self {
            engine,
            pipeline,
            io,
            log_stats: false,
            input,
        }
    }

    /// Returns the pipeline used for decoding.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Returns the model io description.
    pub fn io(&self) -> &ModelIo {
        &self.io
    }

    /// Returns the wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Detects objects in one `width x height` frame of packed ARGB pixels.
    ///
    /// The frame must match the model's square input size.
    pub fn recognize(
        &mut self,
        pixels: &[u32],
        width: usize,
        height: usize,
    ) -> Result<Vec<Detection>, DetectorError<E::Error>> {
        enter_span!(frame, "recognize", width = width, height = height);

        let frame_len = match width.checked_mul(height) {
            Some(len) if len == pixels.len() => len,
            len => {
                return Err(YoloDecodeError::ShapeMismatch {
                    expected: len.unwrap_or(usize::MAX),
                    got: pixels.len(),
                }
                .into())
            }
        };
        if width != self.io.input_size || height != self.io.input_size {
            return Err(YoloDecodeError::ShapeMismatch {
                expected: self.io.input_size.saturating_mul(self.io.input_size),
                got: frame_len,
            }
            .into());
        }

        let mut timer = StageTimer::new();

        timer.tic();
        argb_to_rgb_tensor_into(pixels, &mut self.input)?;
        timer.toc("preprocess");

        timer.tic();
        self.engine
            .feed(&self.io.input_name, &self.input, &self.io.input_dims())
            .map_err(DetectorError::Engine)?;
        timer.toc("feed");

        timer.tic();
        self.engine
            .run(&self.io.output_names, self.log_stats)
            .map_err(DetectorError::Engine)?;
        timer.toc("run");

        let primary = self
            .io
            .output_names
            .first()
            .ok_or_else(|| YoloDecodeError::config("at least one output name is required"))?;
        timer.tic();
        let output = self.engine.fetch(primary).map_err(DetectorError::Engine)?;
        timer.toc("fetch");

        timer.tic();
        let detections = self.pipeline.process(&output, width, height)?;
        timer.toc("process");

        trace_event!(
            frame,
            "frame_done",
            count = detections.len(),
            micros = timer.total().as_micros() as u64
        );
        Ok(detections)
    }

    /// Asks the engine to collect statistics on subsequent runs.
    pub fn enable_stat_logging(&mut self, log_stats: bool) {
        self.log_stats = log_stats;
    }

    /// Statistics reported by the engine.
    pub fn stat_string(&self) -> String {
        self.engine.stats_summary()
    }

    /// Releases the engine and hands it back.
    pub fn close(mut self) -> E {
        self.engine.release();
        self.engine
    }
}
