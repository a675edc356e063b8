use std::path::Path;

use crate::training::domain::face_recognizer::{FaceModel, FaceRecognizer};
use crate::training::infrastructure::sample_collector::SampleCollector;

/// Startup pipeline: collect samples → train → hand back an immutable model.
pub struct TrainModelUseCase {
    collector: SampleCollector,
    recognizer: Box<dyn FaceRecognizer>,
}

impl TrainModelUseCase {
    pub fn new(collector: SampleCollector, recognizer: Box<dyn FaceRecognizer>) -> Self {
        Self {
            collector,
            recognizer,
        }
    }

    /// Collects every sample below `root` and trains on all of them.
    ///
    /// Any ingestion error aborts before the recognizer sees a sample.
    pub fn execute(&self, root: &Path) -> Result<Box<dyn FaceModel>, Box<dyn std::error::Error>> {
        let samples = self.collector.collect(root)?;
        if samples.is_empty() {
            return Err(format!("no training samples found under {}", root.display()).into());
        }

        log::info!(
            "Training on {} samples of {} subjects from {}...",
            samples.len(),
            samples.distinct_labels().len(),
            root.display()
        );
        let model = self.recognizer.train(samples)?;
        log::info!("Training done");
        Ok(model)
    }
}
