//! Maps raw prediction output into the user-facing payload: percentage
//! figures plus the two declarative chart specs rendered client-side.

use crate::domain::prediction::PredictionResult;
use serde::Serialize;
use serde_json::{Value, json};

/// Web-facing view of one prediction. `probability` and `confidence` are
/// percentages; the JSON API exposes the raw [0,1] values instead.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub label: i64,
    pub probability: f64,
    pub confidence: f64,
    pub gauge: Value,
    pub bar: Value,
}

pub fn present(result: &PredictionResult) -> PredictionView {
    let proba = [1.0 - result.probability, result.probability];
    PredictionView {
        label: result.label,
        probability: result.probability * 100.0,
        confidence: result.confidence * 100.0,
        gauge: gauge_spec(result.probability * 100.0),
        bar: bar_spec(proba),
    }
}

/// Single-indicator gauge: conversion probability with fixed color bands
/// at thirds of the axis and a threshold marker at the current value.
pub fn gauge_spec(probability_pct: f64) -> Value {
    json!({
        "data": [{
            "type": "indicator",
            "mode": "gauge+number",
            "value": probability_pct,
            "title": { "text": "Conversion Probability" },
            "domain": { "x": [0, 1], "y": [0, 1] },
            "gauge": {
                "axis": { "range": [0, 100] },
                "bar": { "color": "darkblue" },
                "steps": [
                    { "range": [0, 30], "color": "lightgray" },
                    { "range": [30, 70], "color": "gray" },
                    { "range": [70, 100], "color": "darkgray" }
                ],
                "threshold": {
                    "line": { "color": "red", "width": 4 },
                    "thickness": 0.75,
                    "value": probability_pct
                }
            }
        }],
        "layout": {
            "height": 300,
            "margin": { "l": 20, "r": 20, "t": 50, "b": 20 }
        }
    })
}

/// Two-bar chart of the class probabilities, labeled to one decimal place.
pub fn bar_spec(proba: [f64; 2]) -> Value {
    json!({
        "data": [{
            "type": "bar",
            "x": ["Will Not Subscribe", "Will Subscribe"],
            "y": [proba[0] * 100.0, proba[1] * 100.0],
            "marker": { "color": ["#FF6B6B", "#4ECDC4"] },
            "text": [
                format!("{:.1}%", proba[0] * 100.0),
                format!("{:.1}%", proba[1] * 100.0)
            ],
            "textposition": "auto"
        }],
        "layout": {
            "title": "Prediction Confidence",
            "xaxis": { "title": "Outcome" },
            "yaxis": { "title": "Probability (%)" },
            "height": 300,
            "margin": { "l": 20, "r": 20, "t": 50, "b": 20 }
        }
    })
}
