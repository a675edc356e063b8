use opencv::core::Mat;
use opencv::prelude::*;
use opencv::{imgproc, videoio};

use crate::capture::domain::capture_source::{CaptureError, CaptureSource};
use crate::shared::frame::Frame;

/// Camera capture through OpenCV's `videoio` module.
///
/// Frames arrive from the device as BGR and are converted to RGB here.
pub struct OpencvCamera {
    capture: videoio::VideoCapture,
    frames_read: usize,
}

// Safety: the capture handle is owned by the capture loop and used from a
// single thread at a time.
unsafe impl Send for OpencvCamera {}

impl OpencvCamera {
    pub fn open(device: i32) -> Result<Self, CaptureError> {
        let open_error = |reason: String| CaptureError::Open { device, reason };

        let capture = videoio::VideoCapture::new(device, videoio::CAP_ANY)
            .map_err(|e| open_error(e.to_string()))?;
        let opened = capture
            .is_opened()
            .map_err(|e| open_error(e.to_string()))?;
        if !opened {
            return Err(open_error("device is not available".to_string()));
        }

        Ok(Self {
            capture,
            frames_read: 0,
        })
    }
}

impl CaptureSource for OpencvCamera {
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let read_error = |e: opencv::Error| CaptureError::Read(e.to_string());

        let mut bgr = Mat::default();
        if !self.capture.read(&mut bgr).map_err(read_error)? || bgr.empty() {
            return Ok(None);
        }

        let mut rgb = Mat::default();
        imgproc::cvt_color_def(&bgr, &mut rgb, imgproc::COLOR_BGR2RGB).map_err(read_error)?;

        let width = rgb.cols() as u32;
        let height = rgb.rows() as u32;
        let data = rgb.data_bytes().map_err(read_error)?.to_vec();

        let frame = Frame::new(data, width, height, 3, self.frames_read);
        self.frames_read += 1;
        Ok(Some(frame))
    }
}
