//! A thread-safe waste image classifier with session EXP tracking, built on ONNX Runtime.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use ecosort::{Classifier, SessionProgress, WastePipeline};
//!
//! let classifier = Classifier::builder()
//!     .with_model_file("model.onnx")?
//!     .with_labels_file("labels.txt")?
//!     .build()?;
//! let pipeline = WastePipeline::new(Arc::new(classifier));
//!
//! let bytes = std::fs::read("can.jpg")?;
//! let (progress, report) = pipeline.process(&SessionProgress::new(), &bytes)?;
//! println!("{} detected ({})", report.result.category, report.result.confidence_display());
//! println!("You earned {} EXP, total {}", report.award.points, progress.experience_points);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier loads its model once and is `Send + Sync`; share it across
//! sessions with `Arc`. Each session owns its own [`SessionProgress`].

pub mod assets;
pub mod centers;
pub mod classifier;
pub mod config;
pub mod education;
pub mod footprint;
pub mod guidelines;
pub mod pipeline;
pub mod progression;
mod runtime;

pub use assets::{AssetError, AssetLocator};
pub use classifier::{
    ClassificationResult, Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo,
    ImagePreprocessor, LabelTable, OnnxModel, ScoreModel, TensorLayout,
};
pub use config::AppConfig;
pub use footprint::WasteFootprint;
pub use guidelines::GuidelineTable;
pub use pipeline::{ClassificationReport, WastePipeline};
pub use progression::{Award, ProgressTracker, SessionProgress};
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
