//! Fitted preprocessing transform.
//!
//! Mirrors the column transformer the classifier was trained behind: a
//! one-hot block, an ordinal block, then a robust-scaled numerical block,
//! concatenated in that order. The block layout and the fitted categories
//! are part of the serialized artifact; the classifier's coefficient order
//! depends on them.

use crate::domain::errors::PipelineError;
use crate::domain::features::FeatureRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoded features, in fitted column order.
pub const ONE_HOT_FEATURES: [&str; 4] = ["job", "marital", "contact", "month"];

/// Ordinal-encoded features, in fitted column order.
pub const ORDINAL_FEATURES: [&str; 5] = ["default", "housing", "loan", "education", "poutcome"];

/// Robust-scaled numerical features, in fitted column order.
pub const SCALED_FEATURES: [&str; 7] = [
    "age", "balance", "day", "duration", "campaign", "pdays", "previous",
];

/// One-hot encoder for a single column. Unknown values at transform time
/// produce an all-zero block rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    pub feature: String,
    pub categories: Vec<String>,
}

impl OneHotEncoder {
    fn fit(feature: &str, values: impl Iterator<Item = String>) -> Self {
        Self {
            feature: feature.to_string(),
            categories: sorted_unique(values),
        }
    }

    fn transform_into(&self, value: &str, out: &mut Vec<f64>) {
        for category in &self.categories {
            out.push(if category == value { 1.0 } else { 0.0 });
        }
    }
}

/// Ordinal encoder for a single column. Unknown values are an error, like
/// the encoder the model was originally fitted with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdinalEncoder {
    pub feature: String,
    pub categories: Vec<String>,
}

impl OrdinalEncoder {
    fn fit(feature: &str, values: impl Iterator<Item = String>) -> Self {
        Self {
            feature: feature.to_string(),
            categories: sorted_unique(values),
        }
    }

    fn transform(&self, value: &str) -> Result<f64, PipelineError> {
        self.categories
            .iter()
            .position(|c| c == value)
            .map(|i| i as f64)
            .ok_or_else(|| PipelineError::UnknownCategory {
                feature: self.feature.clone(),
                value: value.to_string(),
            })
    }
}

/// Robust scaler for a single column: centers on the median and scales by
/// the interquartile range. A degenerate IQR of zero scales by 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobustScaler {
    pub feature: String,
    pub center: f64,
    pub scale: f64,
}

impl RobustScaler {
    fn fit(feature: &str, values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let center = quantile(&sorted, 0.5);
        let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
        Self {
            feature: feature.to_string(),
            center,
            scale: if iqr == 0.0 { 1.0 } else { iqr },
        }
    }

    fn transform(&self, value: f64) -> f64 {
        (value - self.center) / self.scale
    }
}

/// The full fitted transform: one encoder/scaler per feature, applied in
/// block order to produce a single flat feature vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    one_hot: Vec<OneHotEncoder>,
    ordinal: Vec<OrdinalEncoder>,
    scalers: Vec<RobustScaler>,
}

impl Preprocessor {
    pub fn fit(records: &[FeatureRecord]) -> Self {
        let one_hot = ONE_HOT_FEATURES
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                OneHotEncoder::fit(
                    feature,
                    records.iter().map(|r| r.one_hot_values()[i].to_string()),
                )
            })
            .collect();
        let ordinal = ORDINAL_FEATURES
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                OrdinalEncoder::fit(
                    feature,
                    records.iter().map(|r| r.ordinal_values()[i].to_string()),
                )
            })
            .collect();
        let scalers = SCALED_FEATURES
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                let values: Vec<f64> = records.iter().map(|r| r.numerical_values()[i]).collect();
                RobustScaler::fit(feature, &values)
            })
            .collect();
        Self {
            one_hot,
            ordinal,
            scalers,
        }
    }

    pub fn transform(&self, record: &FeatureRecord) -> Result<Vec<f64>, PipelineError> {
        let mut out = Vec::with_capacity(self.output_len());
        for (encoder, value) in self.one_hot.iter().zip(record.one_hot_values()) {
            encoder.transform_into(value, &mut out);
        }
        for (encoder, value) in self.ordinal.iter().zip(record.ordinal_values()) {
            out.push(encoder.transform(value)?);
        }
        for (scaler, value) in self.scalers.iter().zip(record.numerical_values()) {
            out.push(scaler.transform(value));
        }
        Ok(out)
    }

    /// Width of the transformed feature vector.
    pub fn output_len(&self) -> usize {
        let one_hot: usize = self.one_hot.iter().map(|e| e.categories.len()).sum();
        one_hot + self.ordinal.len() + self.scalers.len()
    }
}

fn sorted_unique(values: impl Iterator<Item = String>) -> Vec<String> {
    values.collect::<BTreeSet<_>>().into_iter().collect()
}

/// Quantile with linear interpolation over a pre-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(job: &str, default: &str, age: f64) -> FeatureRecord {
        let raw = json!({
            "job": job,
            "marital": "married",
            "education": "secondary",
            "default": default,
            "housing": "no",
            "loan": "no",
            "contact": "cellular",
            "month": "may",
            "poutcome": "unknown",
            "age": age,
        });
        FeatureRecord::coerce(raw.as_object().unwrap())
    }

    fn fitted() -> Preprocessor {
        Preprocessor::fit(&[
            record("admin.", "no", 20.0),
            record("technician", "no", 30.0),
            record("admin.", "yes", 40.0),
            record("management", "no", 50.0),
        ])
    }

    #[test]
    fn test_output_len_matches_transform() {
        let prep = fitted();
        let out = prep.transform(&record("admin.", "no", 25.0)).unwrap();
        assert_eq!(out.len(), prep.output_len());
        // 3 jobs + 1 marital + 1 contact + 1 month, 5 ordinal, 7 scaled.
        assert_eq!(out.len(), 6 + 5 + 7);
    }

    #[test]
    fn test_one_hot_unknown_value_is_zeroed() {
        let prep = fitted();
        let out = prep.transform(&record("astronaut", "no", 25.0)).unwrap();
        // Job block is the first three columns (sorted categories).
        assert_eq!(&out[..3], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ordinal_unknown_value_errors() {
        let prep = fitted();
        let err = prep.transform(&record("admin.", "maybe", 25.0)).unwrap_err();
        match err {
            PipelineError::UnknownCategory { feature, value } => {
                assert_eq!(feature, "default");
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ordinal_categories_are_sorted() {
        let prep = fitted();
        let no = prep.transform(&record("admin.", "no", 25.0)).unwrap();
        let yes = prep.transform(&record("admin.", "yes", 25.0)).unwrap();
        // "no" < "yes" lexicographically, so no → 0.0 and yes → 1.0.
        assert_eq!(no[6], 0.0);
        assert_eq!(yes[6], 1.0);
    }

    #[test]
    fn test_robust_scaling_centers_on_median() {
        let prep = fitted();
        // Ages fitted: 20, 30, 40, 50. Median 35, IQR = 42.5 - 27.5 = 15.
        let out = prep.transform(&record("admin.", "no", 35.0)).unwrap();
        let age_col = prep.output_len() - 7;
        assert!(out[age_col].abs() < 1e-12);
        let out = prep.transform(&record("admin.", "no", 50.0)).unwrap();
        assert!((out[age_col] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.75), 3.25);
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_constant_column_scales_by_one() {
        let prep = Preprocessor::fit(&vec![record("admin.", "no", 30.0); 3]);
        let out = prep.transform(&record("admin.", "no", 31.0)).unwrap();
        let age_col = prep.output_len() - 7;
        assert_eq!(out[age_col], 1.0);
    }
}
