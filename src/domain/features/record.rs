//! Typed feature record and coercion from untyped request input.

use super::schema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One fully-typed input row, covering all 16 schema features exactly once.
///
/// Categorical values are carried as raw strings: they are deliberately NOT
/// validated against the schema's allowed-value set here. The one-hot stage
/// of the fitted transform zeroes unknown values and the ordinal stage
/// rejects them, matching the behavior of the original pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub job: String,
    pub marital: String,
    pub education: String,
    pub default: String,
    pub housing: String,
    pub loan: String,
    pub contact: String,
    pub month: String,
    pub poutcome: String,
    pub age: f64,
    pub balance: f64,
    pub day: f64,
    pub duration: f64,
    pub campaign: f64,
    pub pdays: f64,
    pub previous: f64,
}

impl FeatureRecord {
    /// Builds a record from an untyped key-value map (form fields or a JSON
    /// body). Never fails: absent or unparseable numeric values fall back
    /// to the feature's declared default, categoricals pass through.
    pub fn coerce(raw: &Map<String, Value>) -> Self {
        Self {
            job: categorical_value(raw, "job"),
            marital: categorical_value(raw, "marital"),
            education: categorical_value(raw, "education"),
            default: categorical_value(raw, "default"),
            housing: categorical_value(raw, "housing"),
            loan: categorical_value(raw, "loan"),
            contact: categorical_value(raw, "contact"),
            month: categorical_value(raw, "month"),
            poutcome: categorical_value(raw, "poutcome"),
            age: numerical_value(raw, "age"),
            balance: numerical_value(raw, "balance"),
            day: numerical_value(raw, "day"),
            duration: numerical_value(raw, "duration"),
            campaign: numerical_value(raw, "campaign"),
            pdays: numerical_value(raw, "pdays"),
            previous: numerical_value(raw, "previous"),
        }
    }

    /// Categorical values in fitted transform order: one-hot block first,
    /// then the ordinal block.
    pub fn one_hot_values(&self) -> [&str; 4] {
        [&self.job, &self.marital, &self.contact, &self.month]
    }

    pub fn ordinal_values(&self) -> [&str; 5] {
        [
            &self.default,
            &self.housing,
            &self.loan,
            &self.education,
            &self.poutcome,
        ]
    }

    /// Numerical values in schema (and fitted transform) order.
    pub fn numerical_values(&self) -> [f64; 7] {
        [
            self.age,
            self.balance,
            self.day,
            self.duration,
            self.campaign,
            self.pdays,
            self.previous,
        ]
    }
}

fn categorical_value(raw: &Map<String, Value>, name: &str) -> String {
    match raw.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn numerical_value(raw: &Map<String, Value>, name: &str) -> f64 {
    let parsed = match raw.get(name) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => v,
        _ => schema::numerical_default(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_coerce_full_input() {
        let record = FeatureRecord::coerce(&raw(json!({
            "job": "technician",
            "marital": "single",
            "education": "tertiary",
            "default": "no",
            "housing": "yes",
            "loan": "no",
            "contact": "cellular",
            "month": "may",
            "poutcome": "unknown",
            "age": 42,
            "balance": "1500.5",
            "day": 5,
            "duration": 180,
            "campaign": 2,
            "pdays": -1,
            "previous": 0
        })));
        assert_eq!(record.job, "technician");
        assert_eq!(record.age, 42.0);
        assert_eq!(record.balance, 1500.5);
        assert_eq!(record.pdays, -1.0);
    }

    #[test]
    fn test_unparseable_numeric_falls_back_to_default() {
        let record = FeatureRecord::coerce(&raw(json!({
            "age": "not a number",
            "duration": "",
            "pdays": null
        })));
        assert_eq!(record.age, 30.0);
        assert_eq!(record.duration, 300.0);
        assert_eq!(record.pdays, -1.0);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let record = FeatureRecord::coerce(&Map::new());
        assert_eq!(record.age, 30.0);
        assert_eq!(record.balance, 0.0);
        assert_eq!(record.day, 15.0);
        assert_eq!(record.duration, 300.0);
        assert_eq!(record.campaign, 3.0);
        assert_eq!(record.pdays, -1.0);
        assert_eq!(record.previous, 0.0);
        assert_eq!(record.job, "");
    }

    #[test]
    fn test_non_finite_numeric_rejected() {
        let record = FeatureRecord::coerce(&raw(json!({ "balance": "NaN", "age": "inf" })));
        assert_eq!(record.balance, 0.0);
        assert_eq!(record.age, 30.0);
    }

    #[test]
    fn test_categorical_passes_through_unvalidated() {
        let record = FeatureRecord::coerce(&raw(json!({ "job": "astronaut" })));
        assert_eq!(record.job, "astronaut");
    }

    #[test]
    fn test_record_covers_all_schema_features() {
        let record = FeatureRecord::coerce(&Map::new());
        let value = serde_json::to_value(&record).unwrap();
        let keys = value.as_object().unwrap();
        assert_eq!(keys.len(), 16);
        for feature in crate::domain::features::schema::CATEGORICAL_FEATURES {
            assert!(keys.contains_key(feature.name), "missing {}", feature.name);
        }
        for feature in crate::domain::features::schema::NUMERICAL_FEATURES {
            assert!(keys.contains_key(feature.name), "missing {}", feature.name);
        }
    }
}
