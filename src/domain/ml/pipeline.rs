//! Fitted prediction pipeline: preprocessing transform + logistic classifier.
//!
//! The whole pipeline is serialized as one serde_json artifact, written by
//! the `train` binary and loaded read-only at server start.

use crate::domain::errors::PipelineError;
use crate::domain::features::FeatureRecord;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::preprocess::Preprocessor;

type Classifier = LogisticRegression<f64, i64, DenseMatrix<f64>, Vec<i64>>;

#[derive(Debug, Serialize, Deserialize)]
pub struct Pipeline {
    preprocessor: Preprocessor,
    classifier: Classifier,
    /// Transformed feature-vector width the classifier was fitted on.
    n_features: usize,
}

impl Pipeline {
    /// Fits the preprocessing transform and the classifier on labeled
    /// records. Labels are 0 (no) / 1 (yes).
    pub fn fit(records: &[FeatureRecord], labels: &[i64]) -> Result<Self, PipelineError> {
        if records.is_empty() || records.len() != labels.len() {
            return Err(PipelineError::Training {
                reason: format!(
                    "need equal non-zero rows and labels, got {} rows and {} labels",
                    records.len(),
                    labels.len()
                ),
            });
        }
        let preprocessor = Preprocessor::fit(records);
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            rows.push(preprocessor.transform(record)?);
        }
        let n_features = preprocessor.output_len();
        let x = DenseMatrix::from_2d_vec(&rows).map_err(|e| PipelineError::Training {
            reason: format!("matrix construction failed: {e}"),
        })?;
        let y = labels.to_vec();
        let classifier = LogisticRegression::fit(&x, &y, LogisticRegressionParameters::default())
            .map_err(|e| PipelineError::Training {
                reason: e.to_string(),
            })?;
        Ok(Self {
            preprocessor,
            classifier,
            n_features,
        })
    }

    /// Runs one record through the transform and classifier, returning the
    /// classifier's own label and the two-class probability vector
    /// (index 0 = "no", index 1 = "yes").
    pub fn predict(&self, record: &FeatureRecord) -> Result<(i64, [f64; 2]), PipelineError> {
        let features = self.preprocessor.transform(record)?;
        if features.len() != self.n_features {
            return Err(PipelineError::ShapeMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        let p1 = sigmoid(self.decision_value(&features));
        let input = DenseMatrix::from_2d_vec(&vec![features]).map_err(|e| {
            PipelineError::Inference {
                reason: format!("matrix construction failed: {e}"),
            }
        })?;
        let labels = self
            .classifier
            .predict(&input)
            .map_err(|e| PipelineError::Inference {
                reason: e.to_string(),
            })?;
        let label = *labels.first().ok_or_else(|| PipelineError::Inference {
            reason: "no prediction returned".to_string(),
        })?;
        Ok((label, [1.0 - p1, p1]))
    }

    /// Linear decision value w·x + b from the fitted coefficients. Handles
    /// both coefficient orientations smartcore may store for binary models.
    fn decision_value(&self, features: &[f64]) -> f64 {
        let coef = self.classifier.coefficients();
        let (rows, _cols) = coef.shape();
        let weight = |j: usize| -> f64 {
            if rows == 1 {
                *coef.get((0, j))
            } else {
                *coef.get((j, 0))
            }
        };
        let bias = *self.classifier.intercept().get((0, 0));
        features
            .iter()
            .enumerate()
            .map(|(j, v)| v * weight(j))
            .sum::<f64>()
            + bias
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        let write_err = |reason: String| PipelineError::ArtifactWrite {
            path: path.display().to_string(),
            reason,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let file = File::create(path).map_err(|e| write_err(e.to_string()))?;
        serde_json::to_writer(file, self).map_err(|e| write_err(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        if !path.exists() {
            return Err(PipelineError::ArtifactMissing {
                path: path.display().to_string(),
            });
        }
        let load_err = |reason: String| PipelineError::ArtifactLoad {
            path: path.display().to_string(),
            reason,
        };
        let file = File::open(path).map_err(|e| load_err(e.to_string()))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| load_err(e.to_string()))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(duration: f64, job: &str) -> FeatureRecord {
        let raw = json!({
            "job": job,
            "marital": "married",
            "education": "secondary",
            "default": "no",
            "housing": "yes",
            "loan": "no",
            "contact": "cellular",
            "month": "may",
            "poutcome": "unknown",
            "age": 35,
            "balance": 500,
            "day": 15,
            "duration": duration,
            "campaign": 2,
            "pdays": -1,
            "previous": 0
        });
        FeatureRecord::coerce(raw.as_object().unwrap())
    }

    /// Tiny separable training set: long calls subscribe, short calls don't.
    fn fitted() -> Pipeline {
        let mut records = Vec::new();
        let mut labels = Vec::new();
        for i in 0..10 {
            records.push(record(20.0 + i as f64 * 10.0, "blue-collar"));
            labels.push(0);
            records.push(record(900.0 + i as f64 * 10.0, "management"));
            labels.push(1);
        }
        Pipeline::fit(&records, &labels).unwrap()
    }

    #[test]
    fn test_proba_sums_to_one_and_label_in_range() {
        let pipeline = fitted();
        for duration in [10.0, 120.0, 450.0, 950.0] {
            let (label, proba) = pipeline.predict(&record(duration, "management")).unwrap();
            assert!(label == 0 || label == 1);
            assert!((proba[0] + proba[1] - 1.0).abs() < 1e-9);
            assert!(proba[0] >= 0.0 && proba[0] <= 1.0);
        }
    }

    #[test]
    fn test_label_agrees_with_probability() {
        let pipeline = fitted();
        for duration in [30.0, 80.0, 920.0, 990.0] {
            let (label, proba) = pipeline.predict(&record(duration, "management")).unwrap();
            assert_eq!(label == 1, proba[1] > 0.5, "duration {duration}");
        }
    }

    #[test]
    fn test_separable_data_is_separated() {
        let pipeline = fitted();
        let (label, proba) = pipeline.predict(&record(950.0, "management")).unwrap();
        assert_eq!(label, 1);
        assert!(proba[1] > 0.5);
        let (label, proba) = pipeline.predict(&record(30.0, "blue-collar")).unwrap();
        assert_eq!(label, 0);
        assert!(proba[1] < 0.5);
    }

    #[test]
    fn test_unseen_one_hot_category_still_predicts() {
        let pipeline = fitted();
        // "student" never appeared in the training set: zeroed block.
        let result = pipeline.predict(&record(950.0, "student"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_unknown_ordinal_category_errors() {
        let pipeline = fitted();
        let mut bad = record(950.0, "management");
        bad.default = "maybe".to_string();
        let err = pipeline.predict(&bad).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownCategory { .. }));
    }

    #[test]
    fn test_load_missing_artifact() {
        let err = Pipeline::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactMissing { .. }));
    }
}
