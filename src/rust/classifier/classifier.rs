use std::sync::Arc;
use image::DynamicImage;
use log::{debug, warn};

use super::error::ClassifierError;
use super::labels::LabelTable;
use super::model::ScoreModel;
use super::preprocess::ImagePreprocessor;
use super::resolver::{resolve, ClassificationResult};

/// A thread-safe waste image classifier.
///
/// # Thread Safety
///
/// The model and label table are held behind `Arc`, so a built classifier
/// can be cloned cheaply or wrapped in an `Arc` and shared across threads.
/// The model is loaded once at build time and never reloaded.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use ecosort::Classifier;
///
/// let classifier = Classifier::builder()
///     .with_model_file("model.onnx")?
///     .with_labels_file("labels.txt")?
///     .build()?;
///
/// let bytes = std::fs::read("bottle.jpg")?;
/// let result = classifier.classify_bytes(&bytes)?;
/// println!("{} ({})", result.category, result.confidence_display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    pub(crate) model: Arc<dyn ScoreModel>,
    pub(crate) labels: Arc<LabelTable>,
    pub(crate) preprocessor: ImagePreprocessor,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            num_labels: self.labels.len(),
            labels: self.labels.iter().map(|(_, name)| name.to_string()).collect(),
            input_shape: self.preprocessor.output_shape(),
        }
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Decodes an upload and classifies it.
    ///
    /// # Errors
    /// - `InvalidImage` if the bytes are not a decodable raster image
    /// - Anything [`Classifier::classify`] returns
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<ClassificationResult, ClassifierError> {
        let image = ImagePreprocessor::decode(bytes)?;
        self.classify(&image)
    }

    /// Classifies an already decoded image.
    ///
    /// # Errors
    /// - `PredictionError` if inference fails or yields no usable scores
    /// - `LabelMismatch` if the model picks an index outside the label table
    pub fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, ClassifierError> {
        let batch = self.preprocessor.preprocess(image);
        let scores = self.model.scores(&batch)?;
        if scores.len() != self.labels.len() {
            warn!(
                "Model returned {} scores for {} labels",
                scores.len(),
                self.labels.len()
            );
        }
        let result = resolve(&scores, &self.labels)?;
        debug!("Classified as '{}' ({:.2}%)", result.category, result.confidence);
        Ok(result)
    }
}
