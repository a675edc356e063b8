use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to open video capture device {device}: {reason}")]
    Open { device: i32, reason: String },
    #[error("failed to read frame: {0}")]
    Read(String),
    #[error("giving up after {attempts} consecutive failed frames: {last}")]
    PersistentFailure { attempts: usize, last: String },
}

/// Source of successive color frames, typically a camera.
///
/// Opening happens in the implementation's constructor and is fatal on
/// failure; individual reads may fail transiently.
pub trait CaptureSource: Send {
    /// Reads the next frame as RGB. `Ok(None)` means no frame was available
    /// this time (device still warming up, dropped frame).
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;
}
