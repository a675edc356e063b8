pub mod camera_factory;
#[cfg(feature = "opencv")]
pub mod opencv_camera;
