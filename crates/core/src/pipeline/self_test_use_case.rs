use rand::Rng;
use thiserror::Error;

use crate::training::domain::face_recognizer::FaceRecognizer;
use crate::training::domain::label::Label;
use crate::training::domain::sample::TrainingSet;

#[derive(Error, Debug)]
pub enum SelfTestError {
    #[error("self-test needs at least two samples, found {0}")]
    NotEnoughSamples(usize),
    #[error("recognizer failed: {0}")]
    Recognition(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelfTestReport {
    /// Position of the held-out sample in collection order.
    pub held_out_index: usize,
    pub expected: Label,
    pub predicted: Label,
    pub training_samples: usize,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.expected == self.predicted
    }
}

/// Holds out one random sample, trains on the rest, and predicts the
/// held-out image.
pub struct SelfTestUseCase {
    recognizer: Box<dyn FaceRecognizer>,
}

impl SelfTestUseCase {
    pub fn new(recognizer: Box<dyn FaceRecognizer>) -> Self {
        Self { recognizer }
    }

    pub fn execute<R: Rng + ?Sized>(
        &self,
        mut samples: TrainingSet,
        rng: &mut R,
    ) -> Result<SelfTestReport, SelfTestError> {
        let total = samples.len();
        if total < 2 {
            return Err(SelfTestError::NotEnoughSamples(total));
        }

        let held_out_index = rng.gen_range(0..total);
        let held_out = samples
            .take(held_out_index)
            .ok_or(SelfTestError::NotEnoughSamples(total))?;
        let training_samples = samples.len();

        let model = self
            .recognizer
            .train(samples)
            .map_err(|e| SelfTestError::Recognition(e.to_string()))?;
        let predicted = model
            .predict(held_out.image())
            .map_err(|e| SelfTestError::Recognition(e.to_string()))?;

        Ok(SelfTestReport {
            held_out_index,
            expected: held_out.label(),
            predicted,
            training_samples,
        })
    }
}
