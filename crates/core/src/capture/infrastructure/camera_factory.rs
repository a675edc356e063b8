use crate::capture::domain::capture_source::{CaptureError, CaptureSource};

/// Opens the camera at `device` with the capture backend of this build.
///
/// Failure here is fatal to the caller: there is nothing to run without a
/// frame source.
pub fn open_camera(device: i32) -> Result<Box<dyn CaptureSource>, CaptureError> {
    #[cfg(feature = "opencv")]
    {
        use super::opencv_camera::OpencvCamera;
        Ok(Box::new(OpencvCamera::open(device)?))
    }
    #[cfg(not(feature = "opencv"))]
    {
        Err(CaptureError::Open {
            device,
            reason: "camera capture requires building with `--features opencv`".to_string(),
        })
    }
}
