use std::collections::HashMap;
use std::fmt::Debug;
use std::path::Path;
use log::{debug, info, error};
use ndarray::Array4;
use ort::session::Session;
use ort::value::Tensor;

use super::error::ClassifierError;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Anything that turns a preprocessed batch into one score per label.
///
/// Implementations are loaded once and shared read-only across sessions, so
/// they must be `Send + Sync`.
pub trait ScoreModel: Debug + Send + Sync {
    /// Returns the score vector for a single-item batch, in label order.
    fn scores(&self, input: &Array4<f32>) -> Result<Vec<f32>, ClassifierError>;
}

/// A pre-trained image classifier exported to ONNX.
///
/// The model is expected to:
/// - Accept one image batch as its first input
/// - Produce a `[1, num_labels]` score tensor as its first output
#[derive(Debug)]
pub struct OnnxModel {
    path: String,
    input_name: String,
    session: Session,
}

impl OnnxModel {
    /// Loads the artifact at `path` into an ONNX Runtime session.
    ///
    /// # Errors
    /// - `ModelUnavailable` if the file is missing, cannot be parsed, or
    ///   does not declare any inputs or outputs
    pub fn load(path: impl AsRef<Path>, config: &RuntimeConfig) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClassifierError::ModelUnavailable(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let session = create_session_builder(config)?
            .commit_from_file(path)
            .map_err(|e| {
                error!("Failed to load model {}: {}", path.display(), e);
                ClassifierError::ModelUnavailable(format!("Failed to load {}: {}", path.display(), e))
            })?;

        Self::validate_model(&session)?;
        let input_name = session.inputs[0].name.clone();
        info!("Model {} loaded (input '{}')", path.display(), input_name);

        Ok(Self {
            path: path.to_string_lossy().to_string(),
            input_name,
            session,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Validates that the model has the expected input/output structure
    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        if session.inputs.is_empty() {
            return Err(ClassifierError::ModelUnavailable(
                "Model must have at least 1 input for the image batch".to_string(),
            ));
        }
        if session.outputs.is_empty() {
            return Err(ClassifierError::ModelUnavailable(
                "Model must have at least 1 output for class scores".to_string(),
            ));
        }
        Ok(())
    }
}

impl ScoreModel for OnnxModel {
    fn scores(&self, input: &Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        let input_dyn = input.clone().into_dyn();
        let batch = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.clone(),
            Tensor::from_array(&batch).map_err(|e| {
                ClassifierError::PredictionError(format!("Failed to create input tensor: {}", e))
            })?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| ClassifierError::PredictionError(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            ClassifierError::PredictionError(format!("Failed to extract output tensor: {}", e))
        })?;
        debug!("Model output shape: {:?}", output_tensor.shape());

        Ok(output_tensor.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file() {
        let result = OnnxModel::load("/definitely/not/here/model.onnx", &RuntimeConfig::default());
        assert!(matches!(result, Err(ClassifierError::ModelUnavailable(_))));
    }

    #[test]
    fn test_corrupt_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"not an onnx graph").unwrap();
        let result = OnnxModel::load(&path, &RuntimeConfig::default());
        assert!(matches!(result, Err(ClassifierError::ModelUnavailable(_))));
    }
}
