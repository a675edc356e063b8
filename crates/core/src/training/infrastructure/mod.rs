#[cfg(feature = "opencv")]
pub mod opencv_eigen_recognizer;
pub mod recognizer_factory;
pub mod sample_collector;
