use std::fs;
use std::path::Path;
use std::sync::Arc;
use serde::Serialize;
use log::{info, warn};

use crate::classifier::{ClassificationResult, Classifier, ClassifierError};
use crate::config::DEFAULT_LOW_CONFIDENCE_THRESHOLD;
use crate::guidelines::GuidelineTable;
use crate::progression::{Award, ProgressTracker, SessionProgress};

/// Everything shown to the user after one upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub result: ClassificationResult,
    pub award: Award,
    pub guideline: String,
    pub low_confidence: bool,
    pub experience_points: u32,
    pub achievements: Vec<String>,
    pub progress_fraction: f32,
}

/// Upload → classify → award → advise, for one session at a time.
///
/// The classifier is shared; session progress is passed in and handed back.
#[derive(Debug, Clone)]
pub struct WastePipeline {
    classifier: Arc<Classifier>,
    tracker: ProgressTracker,
    guidelines: GuidelineTable,
    low_confidence_threshold: f32,
}

impl WastePipeline {
    pub fn new(classifier: Arc<Classifier>) -> Self {
        Self {
            classifier,
            tracker: ProgressTracker::default(),
            guidelines: GuidelineTable::default(),
            low_confidence_threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
        }
    }

    pub fn with_tracker(mut self, tracker: ProgressTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn with_guidelines(mut self, guidelines: GuidelineTable) -> Self {
        self.guidelines = guidelines;
        self
    }

    pub fn with_low_confidence_threshold(mut self, threshold: f32) -> Self {
        self.low_confidence_threshold = threshold;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Classifies one upload and applies its award to `progress`.
    ///
    /// `progress` is only read; the updated value is returned on success and
    /// nothing changes on error.
    pub fn process(
        &self,
        progress: &SessionProgress,
        image_bytes: &[u8],
    ) -> Result<(SessionProgress, ClassificationReport), ClassifierError> {
        let result = self.classifier.classify_bytes(image_bytes)?;
        Ok(self.apply(progress.clone(), result))
    }

    /// Reads an upload from disk and runs [`WastePipeline::process`] on it.
    ///
    /// # Errors
    /// - `UnreadableUpload` if the file cannot be read
    pub fn process_file(
        &self,
        progress: &SessionProgress,
        path: impl AsRef<Path>,
    ) -> Result<(SessionProgress, ClassificationReport), ClassifierError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|e| ClassifierError::UnreadableUpload(format!("{}: {}", path.display(), e)))?;
        self.process(progress, &bytes)
    }

    /// Applies an already resolved classification to `progress`.
    pub fn apply(
        &self,
        progress: SessionProgress,
        result: ClassificationResult,
    ) -> (SessionProgress, ClassificationReport) {
        let low_confidence = result.confidence < self.low_confidence_threshold;
        if low_confidence {
            warn!(
                "Low confidence for '{}': {}",
                result.category,
                result.confidence_display()
            );
        }

        let (progress, award) = self.tracker.award(progress, &result.category);
        info!(
            "{} detected, +{} EXP (total {})",
            result.category, award.points, progress.experience_points
        );

        let report = ClassificationReport {
            guideline: self.guidelines.lookup(&result.category).to_string(),
            low_confidence,
            experience_points: progress.experience_points,
            achievements: progress.achievements.clone(),
            progress_fraction: progress.progress_fraction(),
            result,
            award,
        };
        (progress, report)
    }
}
