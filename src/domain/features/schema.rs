//! Static declaration of every model input feature.
//!
//! The trained pipeline was fitted against exactly these 16 columns. The
//! names and the split into categorical/numerical are a model contract:
//! any change here is a breaking change for serialized artifacts.

/// A feature restricted to a fixed enumerated set of string values.
#[derive(Debug, Clone, Copy)]
pub struct CategoricalFeature {
    pub name: &'static str,
    /// Allowed values, in the order the input form presents them.
    pub values: &'static [&'static str],
}

/// A real-valued feature. `min`/`max` are presentation hints for input
/// widgets only and are never enforced at coercion or inference time.
#[derive(Debug, Clone, Copy)]
pub struct NumericalFeature {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

pub const CATEGORICAL_FEATURES: &[CategoricalFeature] = &[
    CategoricalFeature {
        name: "job",
        values: &[
            "admin.",
            "blue-collar",
            "entrepreneur",
            "housemaid",
            "management",
            "retired",
            "self-employed",
            "services",
            "student",
            "technician",
            "unemployed",
            "unknown",
        ],
    },
    CategoricalFeature {
        name: "marital",
        values: &["married", "single", "divorced"],
    },
    CategoricalFeature {
        name: "education",
        values: &["primary", "secondary", "tertiary", "unknown"],
    },
    CategoricalFeature {
        name: "default",
        values: &["no", "yes"],
    },
    CategoricalFeature {
        name: "housing",
        values: &["no", "yes"],
    },
    CategoricalFeature {
        name: "loan",
        values: &["no", "yes"],
    },
    CategoricalFeature {
        name: "contact",
        values: &["cellular", "telephone", "unknown"],
    },
    CategoricalFeature {
        name: "month",
        values: &[
            "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
        ],
    },
    CategoricalFeature {
        name: "poutcome",
        values: &["failure", "success", "unknown", "other"],
    },
];

pub const NUMERICAL_FEATURES: &[NumericalFeature] = &[
    NumericalFeature {
        name: "age",
        min: 18.0,
        max: 95.0,
        default: 30.0,
    },
    NumericalFeature {
        name: "balance",
        min: -10000.0,
        max: 150000.0,
        default: 0.0,
    },
    NumericalFeature {
        name: "day",
        min: 1.0,
        max: 31.0,
        default: 15.0,
    },
    NumericalFeature {
        name: "duration",
        min: 0.0,
        max: 5000.0,
        default: 300.0,
    },
    NumericalFeature {
        name: "campaign",
        min: 1.0,
        max: 50.0,
        default: 3.0,
    },
    NumericalFeature {
        name: "pdays",
        min: -1.0,
        max: 900.0,
        default: -1.0,
    },
    NumericalFeature {
        name: "previous",
        min: 0.0,
        max: 50.0,
        default: 0.0,
    },
];

pub fn categorical(name: &str) -> Option<&'static CategoricalFeature> {
    CATEGORICAL_FEATURES.iter().find(|f| f.name == name)
}

pub fn numerical(name: &str) -> Option<&'static NumericalFeature> {
    NUMERICAL_FEATURES.iter().find(|f| f.name == name)
}

/// Declared default for a numerical feature, 0.0 for unknown names.
pub fn numerical_default(name: &str) -> f64 {
    numerical(name).map(|f| f.default).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_counts() {
        assert_eq!(CATEGORICAL_FEATURES.len(), 9);
        assert_eq!(NUMERICAL_FEATURES.len(), 7);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(categorical("job").unwrap().values.len(), 12);
        assert_eq!(categorical("month").unwrap().values.len(), 12);
        assert_eq!(numerical("pdays").unwrap().default, -1.0);
        assert!(categorical("age").is_none());
        assert!(numerical("job").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = CATEGORICAL_FEATURES
            .iter()
            .map(|f| f.name)
            .chain(NUMERICAL_FEATURES.iter().map(|f| f.name))
            .collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
        assert_eq!(before, 16);
    }
}
