//! Eigenface camera recognition: sample ingestion, frame normalization,
//! confidence smoothing, and the capture loop that ties them together.
//!
//! The recognizer, camera and display window are capabilities behind
//! traits; the `opencv` feature provides implementations backed by the
//! OpenCV `face`, `videoio` and `highgui` modules.

pub mod capture;
pub mod display;
pub mod normalization;
pub mod pipeline;
pub mod recognition;
pub mod shared;
pub mod training;
