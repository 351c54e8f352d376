use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::assets::AssetLocator;
use crate::classifier::{ClassifierError, ImagePreprocessor, TensorLayout};

/// Confidence (in percent) below which a result carries a caution notice.
pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f32 = 60.0;

/// Application settings, loadable from a JSON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub input_size: u32,
    pub layout: TensorLayout,
    /// Compared against the 0-100 confidence
    pub low_confidence_threshold: f32,
    /// Expected SHA-256 of the model file; verification is skipped when unset
    pub model_sha256: Option<String>,
    /// ONNX Runtime intra-op threads, 0 lets the runtime decide
    pub threads: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let locator = AssetLocator::new_default();
        Self {
            model_path: locator.model_path(),
            labels_path: locator.labels_path(),
            input_size: ImagePreprocessor::DEFAULT_SIZE,
            layout: TensorLayout::Nhwc,
            low_confidence_threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
            model_sha256: None,
            threads: 0,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ClassifierError::BuildError(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ClassifierError::BuildError(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.input_size == 0 {
            return Err(ClassifierError::BuildError("input_size must be greater than zero".into()));
        }
        if !(0.0..=100.0).contains(&self.low_confidence_threshold) {
            return Err(ClassifierError::BuildError(format!(
                "low_confidence_threshold must be within 0-100, got {}",
                self.low_confidence_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.input_size, 224);
        assert_eq!(config.low_confidence_threshold, 60.0);
        assert!(config.model_path.ends_with("model.onnx"));
        assert!(config.labels_path.ends_with("labels.txt"));
    }

    #[test]
    fn test_partial_json() {
        let config = AppConfig::from_json(
            r#"{"model_path": "/opt/waste/keras_model.onnx", "layout": "nchw", "input_size": 256}"#,
        )
        .unwrap();
        assert_eq!(config.model_path, PathBuf::from("/opt/waste/keras_model.onnx"));
        assert_eq!(config.layout, TensorLayout::Nchw);
        assert_eq!(config.input_size, 256);
        assert_eq!(config.low_confidence_threshold, 60.0);
    }

    #[test]
    fn test_invalid_values() {
        assert!(AppConfig::from_json(r#"{"input_size": 0}"#).is_err());
        assert!(AppConfig::from_json(r#"{"low_confidence_threshold": 0.6e3}"#).is_err());
        assert!(AppConfig::from_json("not json").is_err());
    }
}
