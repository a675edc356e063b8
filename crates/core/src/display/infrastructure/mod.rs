#[cfg(feature = "opencv")]
pub mod highgui_window;
pub mod window_factory;
