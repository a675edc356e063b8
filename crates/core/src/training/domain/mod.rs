pub mod face_recognizer;
pub mod label;
pub mod sample;
