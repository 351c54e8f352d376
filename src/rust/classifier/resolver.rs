use serde::Serialize;

use super::error::ClassifierError;
use super::labels::LabelTable;

/// The resolved category for one upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub index: usize,
    pub category: String,
    /// Percentage in `[0, 100]`
    pub confidence: f32,
}

impl ClassificationResult {
    /// Confidence formatted for display, e.g. `93.20%`.
    pub fn confidence_display(&self) -> String {
        format!("{:.2}%", self.confidence)
    }
}

/// Position of the largest score; the earliest position wins ties and NaN never wins.
pub(crate) fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

/// Picks the arg-max of `scores` and names it through `labels`.
///
/// # Errors
/// - `PredictionError` if `scores` is empty or entirely NaN
/// - `LabelMismatch` if the winning index has no label
pub fn resolve(scores: &[f32], labels: &LabelTable) -> Result<ClassificationResult, ClassifierError> {
    let index = argmax(scores)
        .ok_or_else(|| ClassifierError::PredictionError("Model returned no usable scores".into()))?;
    let category = labels.get(index).ok_or(ClassifierError::LabelMismatch {
        index,
        available: labels.len(),
    })?;
    Ok(ClassificationResult {
        index,
        category: category.to_string(),
        confidence: (scores[index] * 100.0).clamp(0.0, 100.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> LabelTable {
        LabelTable::new(vec!["cardboard", "glass", "metal", "plastic"]).unwrap()
    }

    #[test]
    fn test_picks_maximum() {
        let result = resolve(&[0.1, 0.05, 0.7, 0.15], &labels()).unwrap();
        assert_eq!(result.index, 2);
        assert_eq!(result.category, "metal");
    }

    #[test]
    fn test_tie_goes_to_lower_index() {
        let result = resolve(&[0.1, 0.4, 0.1, 0.4], &labels()).unwrap();
        assert_eq!(result.category, "glass");
    }

    #[test]
    fn test_confidence_display() {
        let result = resolve(&[0.932, 0.068], &labels()).unwrap();
        assert_eq!(result.confidence_display(), "93.20%");
    }

    #[test]
    fn test_confidence_is_clamped() {
        let high = resolve(&[3.5, 0.0], &labels()).unwrap();
        assert_eq!(high.confidence, 100.0);
        let low = resolve(&[-2.0, -3.0], &labels()).unwrap();
        assert_eq!(low.confidence, 0.0);
    }

    #[test]
    fn test_nan_is_skipped() {
        let result = resolve(&[f32::NAN, 0.2, 0.3], &labels()).unwrap();
        assert_eq!(result.index, 2);
        assert!(resolve(&[f32::NAN], &labels()).is_err());
    }

    #[test]
    fn test_index_beyond_labels() {
        let result = resolve(&[0.0, 0.0, 0.0, 0.0, 0.9], &labels());
        assert!(matches!(result, Err(ClassifierError::LabelMismatch { index: 4, available: 4 })));
    }

    #[test]
    fn test_empty_scores() {
        assert!(matches!(resolve(&[], &labels()), Err(ClassifierError::PredictionError(_))));
    }
}
