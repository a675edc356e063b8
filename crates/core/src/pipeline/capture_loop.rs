use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::capture::domain::capture_source::{CaptureError, CaptureSource};
use crate::display::domain::render_sink::{RenderControl, RenderSink};
use crate::display::domain::status_border::StatusBorder;
use crate::normalization::domain::frame_normalizer::FrameNormalizer;
use crate::pipeline::loop_logger::LoopLogger;
use crate::recognition::domain::confidence_tracker::{level_for, ConfidenceTracker};
use crate::shared::constants::{DEFAULT_TARGET_LABEL, FRAME_INTERVAL, MAX_CONSECUTIVE_FAILURES};
use crate::training::domain::face_recognizer::FaceModel;
use crate::training::domain::label::Label;

/// Configuration for a capture loop run.
pub struct CaptureLoopConfig {
    /// Subject whose recognition raises the confidence count.
    pub target_label: Label,
    pub frame_interval: Duration,
    /// Failed cycles in a row that end the loop. Clamped to at least 1.
    pub max_consecutive_failures: usize,
    pub cancelled: Arc<AtomicBool>,
}

impl Default for CaptureLoopConfig {
    fn default() -> Self {
        Self {
            target_label: DEFAULT_TARGET_LABEL,
            frame_interval: FRAME_INTERVAL,
            max_consecutive_failures: MAX_CONSECUTIVE_FAILURES,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Capturing,
    Terminated,
}

/// Why a loop ended without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    Cancelled,
    StopRequested,
    AlreadyTerminated,
}

/// Live recognition loop: capture → normalize → predict → smooth → render.
///
/// Owns all per-run state (the confidence tracker and the failure streak),
/// and paces itself to `frame_interval` with a ticker. A failed cycle (no
/// frame, unreadable frame, prediction or display error) is skipped and
/// retried on the next tick, leaving the tracker untouched; only a streak
/// of `max_consecutive_failures` failures ends the loop with an error.
pub struct CaptureLoop {
    source: Box<dyn CaptureSource>,
    model: Box<dyn FaceModel>,
    sink: Box<dyn RenderSink>,
    logger: Box<dyn LoopLogger>,
    normalizer: FrameNormalizer,
    border: StatusBorder,
    tracker: ConfidenceTracker,
    config: CaptureLoopConfig,
    state: LoopState,
    consecutive_failures: usize,
}

impl CaptureLoop {
    pub fn new(
        source: Box<dyn CaptureSource>,
        model: Box<dyn FaceModel>,
        sink: Box<dyn RenderSink>,
        logger: Box<dyn LoopLogger>,
        config: CaptureLoopConfig,
    ) -> Self {
        Self {
            source,
            model,
            sink,
            logger,
            normalizer: FrameNormalizer::default(),
            border: StatusBorder::default(),
            tracker: ConfidenceTracker::default(),
            config,
            state: LoopState::Idle,
            consecutive_failures: 0,
        }
    }

    pub fn with_tracker(mut self, tracker: ConfidenceTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn tracker(&self) -> &ConfidenceTracker {
        &self.tracker
    }

    /// Runs until cancelled, stopped by the viewer, or failing persistently.
    pub fn run(&mut self) -> Result<LoopExit, CaptureError> {
        if self.state == LoopState::Terminated {
            return Ok(LoopExit::AlreadyTerminated);
        }
        self.state = LoopState::Capturing;
        log::info!(
            "Capturing (target label {}, {:?} per frame)",
            self.config.target_label,
            self.config.frame_interval
        );

        let ticker = crossbeam_channel::tick(self.config.frame_interval);
        let result = loop {
            if self.config.cancelled.load(Ordering::Relaxed) {
                break Ok(LoopExit::Cancelled);
            }
            match self.step() {
                Ok(RenderControl::Continue) => {}
                Ok(RenderControl::Stop) => break Ok(LoopExit::StopRequested),
                Err(e) => break Err(e),
            }
            if ticker.recv().is_err() {
                break Ok(LoopExit::Cancelled);
            }
        };

        self.state = LoopState::Terminated;
        self.logger.summary();
        result
    }

    /// Runs a single cycle, absorbing transient failures.
    pub fn step(&mut self) -> Result<RenderControl, CaptureError> {
        match self.cycle() {
            Ok(Some(control)) => {
                self.consecutive_failures = 0;
                Ok(control)
            }
            Ok(None) => self.record_failure("no frame available".to_string()),
            Err(e) => self.record_failure(e.to_string()),
        }
    }

    fn record_failure(&mut self, message: String) -> Result<RenderControl, CaptureError> {
        self.consecutive_failures += 1;
        self.logger.failure(self.consecutive_failures, &message);

        if self.consecutive_failures >= self.config.max_consecutive_failures.max(1) {
            return Err(CaptureError::PersistentFailure {
                attempts: self.consecutive_failures,
                last: message,
            });
        }
        Ok(RenderControl::Continue)
    }

    fn cycle(&mut self) -> Result<Option<RenderControl>, Box<dyn std::error::Error>> {
        let start = Instant::now();
        let Some(frame) = self.source.read()? else {
            return Ok(None);
        };
        self.logger.timing("capture", elapsed_ms(start));

        let start = Instant::now();
        let face = self.normalizer.normalize(&frame)?;
        self.logger.timing("normalize", elapsed_ms(start));

        let start = Instant::now();
        let predicted = self.model.predict(&face)?;
        self.logger.timing("predict", elapsed_ms(start));

        // The count is committed only once the frame has been shown.
        let matched = predicted == self.config.target_label;
        let level = level_for(self.tracker.peek(matched), self.tracker.max());

        let start = Instant::now();
        let crop = self.normalizer.crop_for(frame.width(), frame.height());
        let view = self.border.compose(&frame, crop, level);
        let control = self.sink.render(&view)?;
        self.logger.timing("render", elapsed_ms(start));

        let count = self.tracker.update(matched);
        self.logger.frame(frame.index(), predicted, count, level);

        Ok(Some(control))
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
