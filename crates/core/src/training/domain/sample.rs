use std::collections::BTreeSet;

use image::GrayImage;

use super::label::Label;

/// One training pair: a grayscale face image and the subject it shows.
#[derive(Clone, Debug)]
pub struct Sample {
    image: GrayImage,
    label: Label,
}

impl Sample {
    pub fn new(image: GrayImage, label: Label) -> Self {
        Self { image, label }
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn into_parts(self) -> (GrayImage, Label) {
        (self.image, self.label)
    }
}

/// Samples stored as parallel `images`/`labels` arrays, the layout
/// recognizers consume. Index `i` of one always pairs with index `i` of the
/// other.
#[derive(Clone, Debug, Default)]
pub struct TrainingSet {
    images: Vec<GrayImage>,
    labels: Vec<Label>,
}

impl TrainingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        let (image, label) = sample.into_parts();
        self.images.push(image);
        self.labels.push(label);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn images(&self) -> &[GrayImage] {
        &self.images
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn get(&self, index: usize) -> Option<(&GrayImage, Label)> {
        Some((self.images.get(index)?, *self.labels.get(index)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GrayImage, Label)> + '_ {
        self.images.iter().zip(self.labels.iter().copied())
    }

    pub fn distinct_labels(&self) -> BTreeSet<Label> {
        self.labels.iter().copied().collect()
    }

    /// Removes the sample at `index`, keeping the remaining pairs in order.
    pub fn take(&mut self, index: usize) -> Option<Sample> {
        if index >= self.len() {
            return None;
        }
        let image = self.images.remove(index);
        let label = self.labels.remove(index);
        Some(Sample::new(image, label))
    }
}

impl FromIterator<Sample> for TrainingSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        let mut set = TrainingSet::new();
        for sample in iter {
            set.push(sample);
        }
        set
    }
}
