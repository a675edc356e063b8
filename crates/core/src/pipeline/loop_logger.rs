use std::collections::HashMap;
use std::time::Instant;

use crate::recognition::domain::confidence_tracker::ConfidenceLevel;
use crate::training::domain::label::Label;

/// Observer for capture loop events.
///
/// Keeps the loop free of output concerns; the CLI logs through the `log`
/// crate while tests discard everything.
pub trait LoopLogger: Send {
    /// Record one fully processed frame.
    fn frame(&mut self, index: usize, predicted: Label, count: u32, level: ConfidenceLevel);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a failed cycle and how many have failed in a row.
    fn failure(&mut self, consecutive: usize, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

pub struct NullLoopLogger;

impl LoopLogger for NullLoopLogger {
    fn frame(&mut self, _index: usize, _predicted: Label, _count: u32, _level: ConfidenceLevel) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn failure(&mut self, _consecutive: usize, _message: &str) {}
}

/// Reports through the `log` facade: level changes as they happen, a status
/// line every `throttle_frames` frames, and per-stage timings at the end of
/// the run.
pub struct StdoutLoopLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    frames: usize,
    failures: usize,
    last_level: Option<ConfidenceLevel>,
}

impl StdoutLoopLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
            failures: 0,
            last_level: None,
        }
    }

    /// Returns the formatted summary, or `None` if nothing was processed.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 && self.failures == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Capture summary ({} frames, {} failed cycles, {:.1}s total):",
            self.frames,
            self.failures,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            lines.push(format!("  {stage:10}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms"));
        }

        if self.frames > 0 && elapsed_ms > 0.0 {
            let fps = self.frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl Default for StdoutLoopLogger {
    fn default() -> Self {
        Self::new(60)
    }
}

impl LoopLogger for StdoutLoopLogger {
    fn frame(&mut self, index: usize, predicted: Label, count: u32, level: ConfidenceLevel) {
        self.frames += 1;
        if self.last_level != Some(level) {
            log::info!("Recognition {level} (count {count}, frame {index})");
            self.last_level = Some(level);
        }
        if self.frames % self.throttle_frames == 0 {
            log::debug!("Frame {index}: predicted {predicted}, count {count} ({level})");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn failure(&mut self, consecutive: usize, message: &str) {
        self.failures += 1;
        log::warn!("Frame skipped ({consecutive} in a row): {message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullLoopLogger;
        logger.frame(0, 1, 1, ConfidenceLevel::Partial);
        logger.timing("predict", 5.0);
        logger.failure(1, "dropped");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = StdoutLoopLogger::new(10);
        logger.timing("predict", 20.0);
        logger.timing("predict", 30.0);
        logger.timing("render", 5.0);

        let predict = logger.timings_for("predict").unwrap();
        assert_eq!(predict.len(), 2);
        assert!((predict[1] - 30.0).abs() < f64::EPSILON);
        assert_eq!(logger.timings_for("render").unwrap().len(), 1);
        assert!(logger.timings_for("capture").is_none());
    }

    #[test]
    fn test_frames_and_failures_counted() {
        let mut logger = StdoutLoopLogger::new(10);
        logger.frame(0, 41, 1, ConfidenceLevel::Partial);
        logger.frame(1, 41, 2, ConfidenceLevel::Partial);
        logger.failure(1, "no frame");
        assert_eq!(logger.frames(), 2);
        assert_eq!(logger.failures(), 1);
    }

    #[test]
    fn test_level_change_tracked() {
        let mut logger = StdoutLoopLogger::new(10);
        logger.frame(0, 3, 0, ConfidenceLevel::None);
        assert_eq!(logger.last_level, Some(ConfidenceLevel::None));
        logger.frame(1, 41, 1, ConfidenceLevel::Partial);
        assert_eq!(logger.last_level, Some(ConfidenceLevel::Partial));
    }

    #[test]
    fn test_summary_includes_stages_and_counts() {
        let mut logger = StdoutLoopLogger::new(10);
        logger.frame(0, 41, 1, ConfidenceLevel::Partial);
        logger.timing("normalize", 2.0);
        logger.timing("predict", 8.0);
        logger.failure(1, "dropped");

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Capture summary (1 frames, 1 failed cycles"));
        assert!(summary.contains("normalize"));
        assert!(summary.contains("predict"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutLoopLogger::new(10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_throttle_at_least_one() {
        let logger = StdoutLoopLogger::new(0);
        assert_eq!(logger.throttle_frames, 1);
        assert_eq!(StdoutLoopLogger::default().throttle_frames, 60);
    }
}
