use image::GrayImage;
use opencv::core::{Mat, Ptr, Vector};
use opencv::face::EigenFaceRecognizer;
use opencv::prelude::*;

use crate::training::domain::face_recognizer::{FaceModel, FaceRecognizer};
use crate::training::domain::label::Label;
use crate::training::domain::sample::TrainingSet;

/// Eigenface recognizer backed by OpenCV's `face` module.
///
/// `num_components = 0` keeps every principal component; a threshold of
/// `f64::MAX` means the nearest subject is always reported.
pub struct OpencvEigenRecognizer {
    num_components: i32,
    threshold: f64,
}

impl OpencvEigenRecognizer {
    pub fn new(num_components: i32, threshold: f64) -> Self {
        Self {
            num_components,
            threshold,
        }
    }
}

impl Default for OpencvEigenRecognizer {
    fn default() -> Self {
        Self::new(0, f64::MAX)
    }
}

impl FaceRecognizer for OpencvEigenRecognizer {
    fn train(&self, samples: TrainingSet) -> Result<Box<dyn FaceModel>, Box<dyn std::error::Error>> {
        if samples.is_empty() {
            return Err("cannot train a recognizer without samples".into());
        }

        let mut images = Vector::<Mat>::with_capacity(samples.len());
        for image in samples.images() {
            images.push(gray_to_mat(image)?);
        }
        let labels = samples
            .labels()
            .iter()
            .map(|&label| i32::try_from(label))
            .collect::<Result<Vector<i32>, _>>()?;

        let mut model = EigenFaceRecognizer::create(self.num_components, self.threshold)?;
        model.train(&images, &labels)?;
        Ok(Box::new(OpencvEigenModel { model }))
    }
}

struct OpencvEigenModel {
    model: Ptr<EigenFaceRecognizer>,
}

// Safety: the model is moved into the capture loop once training is done and
// only ever used from that thread.
unsafe impl Send for OpencvEigenModel {}

impl FaceModel for OpencvEigenModel {
    fn predict(&self, face: &GrayImage) -> Result<Label, Box<dyn std::error::Error>> {
        let mat = gray_to_mat(face)?;
        let predicted = self.model.predict_label(&mat)?;
        Label::try_from(predicted)
            .map_err(|_| format!("recognizer returned no subject (label {predicted})").into())
    }
}

/// Copies a gray image into an owned single-channel `Mat`.
fn gray_to_mat(image: &GrayImage) -> opencv::Result<Mat> {
    let borrowed = Mat::new_rows_cols_with_data(
        image.height() as i32,
        image.width() as i32,
        image.as_raw().as_slice(),
    )?;
    borrowed.try_clone()
}
