mod builder;
mod classifier;
mod error;
mod labels;
mod model;
mod preprocess;
mod resolver;

pub use builder::ClassifierBuilder;
pub use classifier::Classifier;
pub use error::ClassifierError;
pub use labels::LabelTable;
pub use model::{OnnxModel, ScoreModel};
pub use preprocess::{ImagePreprocessor, TensorLayout};
pub use resolver::{resolve, ClassificationResult};

/// Information about a classifier's current state
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    pub num_labels: usize,
    pub labels: Vec<String>,
    pub input_shape: [usize; 4],
}
