use image::GrayImage;

use super::label::Label;
use super::sample::TrainingSet;

/// Domain interface for training a face recognition model.
///
/// The training set is consumed: samples are not kept once a model exists.
pub trait FaceRecognizer {
    fn train(&self, samples: TrainingSet) -> Result<Box<dyn FaceModel>, Box<dyn std::error::Error>>;
}

/// A trained model. Immutable after training, so prediction takes `&self`.
pub trait FaceModel: Send {
    /// Predicts the subject shown in a normalized face image.
    fn predict(&self, face: &GrayImage) -> Result<Label, Box<dyn std::error::Error>>;
}
