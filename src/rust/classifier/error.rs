use ort::Error as OrtError;

/// Represents the different types of errors that can occur while classifying waste images.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// The upload could not be decoded as a raster image
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    /// The upload could not be read from disk
    #[error("Unreadable upload: {0}")]
    UnreadableUpload(String),
    /// The model artifact is missing, corrupt or could not be loaded
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    /// The model selected an index the label table has no entry for
    #[error("Label mismatch: model selected index {index} but only {available} labels are loaded")]
    LabelMismatch { index: usize, available: usize },
    /// The label list file is unreadable or malformed
    #[error("Label file error: {0}")]
    LabelFile(String),
    /// Inference ran but produced output that cannot be resolved
    #[error("Prediction error: {0}")]
    PredictionError(String),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
}

impl ClassifierError {
    /// Whether the user can fix this by supplying a different upload.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::InvalidImage(_) | Self::UnreadableUpload(_))
    }
}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::PredictionError(err.to_string())
    }
}

impl From<image::ImageError> for ClassifierError {
    fn from(err: image::ImageError) -> Self {
        ClassifierError::InvalidImage(err.to_string())
    }
}
