use serde::{Deserialize, Serialize};

/// Output of one inference, constructed fresh per request.
///
/// `probability` is the class-1 (subscribe) probability and `confidence`
/// the probability mass of the predicted class, both raw values in [0, 1].
/// Percentage scaling happens in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: i64,
    pub probability: f64,
    pub confidence: f64,
}

impl PredictionResult {
    pub fn from_proba(label: i64, proba: [f64; 2]) -> Self {
        Self {
            label,
            probability: proba[1],
            confidence: proba[0].max(proba[1]),
        }
    }

    pub fn message(&self) -> &'static str {
        if self.label == 1 {
            "Will subscribe"
        } else {
            "Will not subscribe"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_proba() {
        let result = PredictionResult::from_proba(1, [0.2, 0.8]);
        assert_eq!(result.label, 1);
        assert_eq!(result.probability, 0.8);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.message(), "Will subscribe");
    }

    #[test]
    fn test_confidence_is_max_class_probability() {
        let result = PredictionResult::from_proba(0, [0.7, 0.3]);
        assert_eq!(result.probability, 0.3);
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.message(), "Will not subscribe");
    }
}
