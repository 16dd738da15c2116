//! Frame and stage instrumentation.
//!
//! Frame-level work (`recognize`, `pipeline`) is reported at info level and
//! the stages inside a frame at debug level. Without the `tracing` feature
//! spans vanish entirely and event values are evaluated then dropped.

use std::time::{Duration, Instant};

/// Enters a span that lasts until the end of the enclosing block.
///
/// The first token picks the level: `frame` (info) or `stage` (debug).
#[cfg(feature = "tracing")]
macro_rules! enter_span {
    (frame, $name:expr $(, $($field:tt)*)?) => {
        let _span_guard = tracing::info_span!($name $(, $($field)*)?).entered();
    };
    (stage, $name:expr $(, $($field:tt)*)?) => {
        let _span_guard = tracing::debug_span!($name $(, $($field)*)?).entered();
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! enter_span {
    ($level:ident, $name:expr $(, $($field:tt)*)?) => {};
}

/// Emits a named event with key/value fields at `frame` or `stage` level.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    (frame, $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    (stage, $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($level:ident, $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use enter_span;
pub(crate) use trace_event;

/// Per-stage stopwatch for one frame.
///
/// `tic` starts a stage and `toc` reports its duration as a `frame_stage`
/// event. Completed stages are kept so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct StageTimer {
    started: Option<Instant>,
    stages: Vec<(&'static str, Duration)>,
}

impl StageTimer {
    /// Creates an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts timing the next stage.
    pub fn tic(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Ends the current stage and records it under `stage`.
    ///
    /// Without a matching `tic` the stage is recorded as zero length.
    pub fn toc(&mut self, stage: &'static str) -> Duration {
        let elapsed = self
            .started
            .take()
            .map(|start| start.elapsed())
            .unwrap_or_default();
        trace_event!(
            stage,
            "frame_stage",
            stage = stage,
            micros = elapsed.as_micros() as u64
        );
        self.stages.push((stage, elapsed));
        elapsed
    }

    /// Stages recorded so far, in order.
    pub fn stages(&self) -> &[(&'static str, Duration)] {
        &self.stages
    }

    /// Sum of all recorded stages.
    pub fn total(&self) -> Duration {
        self.stages.iter().map(|(_, d)| *d).sum()
    }
}
