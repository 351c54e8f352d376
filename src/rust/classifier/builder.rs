use std::path::{Path, PathBuf};
use std::sync::Arc;
use log::info;

use super::classifier::Classifier;
use super::error::ClassifierError;
use super::labels::LabelTable;
use super::model::{OnnxModel, ScoreModel};
use super::preprocess::{ImagePreprocessor, TensorLayout};
use crate::runtime::RuntimeConfig;

#[derive(Debug)]
enum ModelSource {
    File(PathBuf),
    Scorer(Arc<dyn ScoreModel>),
}

/// A builder for constructing a Classifier with a fluent interface.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    model: Option<ModelSource>,
    labels: Option<LabelTable>,
    input_size: Option<u32>,
    layout: TensorLayout,
    runtime_config: RuntimeConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    ///
    /// # Example
    /// ```
    /// use ecosort::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime configuration used when an ONNX model file is loaded.
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Uses an ONNX model artifact on disk. The file is loaded by [`ClassifierBuilder::build`].
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - A model is already set
    ///   - The path is empty
    pub fn with_model_file(mut self, path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if self.model.is_some() {
            return Err(ClassifierError::BuildError("Model already set".to_string()));
        }
        if path.as_os_str().is_empty() {
            return Err(ClassifierError::BuildError("Model path cannot be empty".to_string()));
        }
        self.model = Some(ModelSource::File(path.to_path_buf()));
        Ok(self)
    }

    /// Uses an already constructed scorer in place of an ONNX file.
    pub fn with_score_model(mut self, model: impl ScoreModel + 'static) -> Result<Self, ClassifierError> {
        if self.model.is_some() {
            return Err(ClassifierError::BuildError("Model already set".to_string()));
        }
        self.model = Some(ModelSource::Scorer(Arc::new(model)));
        Ok(self)
    }

    /// Reads the `<index> <name>` label list from disk.
    pub fn with_labels_file(self, path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let labels = LabelTable::load(path)?;
        self.with_labels(labels)
    }

    pub fn with_labels(mut self, labels: LabelTable) -> Result<Self, ClassifierError> {
        if self.labels.is_some() {
            return Err(ClassifierError::BuildError("Labels already set".to_string()));
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Square input resolution expected by the model (defaults to 224).
    pub fn with_input_size(mut self, size: u32) -> Self {
        self.input_size = Some(size);
        self
    }

    pub fn with_layout(mut self, layout: TensorLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Builds and returns the final Classifier instance
    ///
    /// # Returns
    /// * `Result<Classifier, ClassifierError>` - The constructed Classifier if successful, or an error if:
    ///   - No model has been set
    ///   - No labels have been set
    ///   - The input size is zero
    ///   - The model file is missing or not a valid model (`ModelUnavailable`)
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        let source = self
            .model
            .ok_or_else(|| ClassifierError::BuildError("A model must be set".to_string()))?;
        let labels = self
            .labels
            .ok_or_else(|| ClassifierError::BuildError("Labels must be set".to_string()))?;
        let preprocessor = ImagePreprocessor::new(self.input_size.unwrap_or(ImagePreprocessor::DEFAULT_SIZE))?
            .with_layout(self.layout);

        let model: Arc<dyn ScoreModel> = match source {
            ModelSource::Scorer(model) => model,
            ModelSource::File(path) => Arc::new(OnnxModel::load(&path, &self.runtime_config)?),
        };

        info!(
            "Classifier ready: {} labels, input shape {:?}",
            labels.len(),
            preprocessor.output_shape()
        );

        Ok(Classifier {
            model,
            labels: Arc::new(labels),
            preprocessor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    #[derive(Debug)]
    struct Fixed(Vec<f32>);

    impl ScoreModel for Fixed {
        fn scores(&self, _input: &Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
            Ok(self.0.clone())
        }
    }

    fn labels() -> LabelTable {
        LabelTable::new(vec!["glass", "metal"]).unwrap()
    }

    #[test]
    fn test_build_requires_model_and_labels() {
        let no_model = ClassifierBuilder::new().with_labels(labels()).unwrap().build();
        assert!(matches!(no_model, Err(ClassifierError::BuildError(_))));

        let no_labels = ClassifierBuilder::new()
            .with_score_model(Fixed(vec![1.0]))
            .unwrap()
            .build();
        assert!(matches!(no_labels, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_model_set_twice() {
        let result = ClassifierBuilder::new()
            .with_score_model(Fixed(vec![1.0]))
            .and_then(|b| b.with_score_model(Fixed(vec![1.0])));
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_missing_model_file_is_unavailable() {
        let result = ClassifierBuilder::new()
            .with_model_file("missing/model.onnx")
            .unwrap()
            .with_labels(labels())
            .unwrap()
            .build();
        assert!(matches!(result, Err(ClassifierError::ModelUnavailable(_))));
        let empty = ClassifierBuilder::new().with_model_file("");
        assert!(matches!(empty, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_runtime_config_after_model_file() {
        let builder = ClassifierBuilder::new()
            .with_model_file("missing/model.onnx")
            .unwrap()
            .with_runtime_config(RuntimeConfig::default().with_threads(3));
        assert_eq!(builder.runtime_config.intra_threads, 3);
        assert!(matches!(&builder.model, Some(ModelSource::File(p)) if p == Path::new("missing/model.onnx")));

        let twice = builder.with_score_model(Fixed(vec![1.0]));
        assert!(matches!(twice, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_zero_input_size() {
        let result = ClassifierBuilder::new()
            .with_score_model(Fixed(vec![1.0]))
            .unwrap()
            .with_labels(labels())
            .unwrap()
            .with_input_size(0)
            .build();
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_info() {
        let classifier = ClassifierBuilder::new()
            .with_score_model(Fixed(vec![0.2, 0.8]))
            .unwrap()
            .with_labels(labels())
            .unwrap()
            .with_input_size(32)
            .with_layout(TensorLayout::Nchw)
            .build()
            .unwrap();
        let info = classifier.info();
        assert_eq!(info.num_labels, 2);
        assert_eq!(info.labels, vec!["glass", "metal"]);
        assert_eq!(info.input_shape, [1, 3, 32, 32]);
    }
}
