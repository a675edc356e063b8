pub mod crop;
pub mod frame_normalizer;
