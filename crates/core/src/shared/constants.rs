use std::time::Duration;

/// Width of the images the recognizer is trained on and predicts from.
pub const FACE_WIDTH: u32 = 92;
/// Height of the images the recognizer is trained on and predicts from.
pub const FACE_HEIGHT: u32 = 112;

pub const SAMPLE_EXTENSION: &str = "pgm";
/// Number of non-digit characters preceding the label in a subject directory name (`s41`).
pub const LABEL_PREFIX_LEN: usize = 1;
pub const DEFAULT_SAMPLES_DIR: &str = "../assets/faces";

/// Subject whose presence lights the border green.
pub const DEFAULT_TARGET_LABEL: u32 = 41;
pub const CONFIDENCE_MAX: u32 = 10;

/// ~60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(1000 / 60);
/// Consecutive failed cycles after which the capture loop gives up.
pub const MAX_CONSECUTIVE_FAILURES: usize = 30;

pub const CAMERA_INDEX: i32 = 0;
pub const WINDOW_NAME: &str = "facecam";

/// Aspect ratio (width / height) of the recognizer's input.
pub fn face_aspect() -> f64 {
    FACE_WIDTH as f64 / FACE_HEIGHT as f64
}
