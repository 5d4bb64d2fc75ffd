//! Placeholder analytics for the dashboard page.
//!
//! Not backed by real prediction history; the figures are fixed sample
//! data until a persistence layer exists to aggregate from.

use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_predictions: u64,
    pub positive_rate: f64,
    pub avg_confidence: f64,
    pub top_job: &'static str,
    pub most_contacted_month: &'static str,
}

pub fn sample_stats() -> DashboardStats {
    DashboardStats {
        total_predictions: 1500,
        positive_rate: 32.5,
        avg_confidence: 78.3,
        top_job: "management",
        most_contacted_month: "may",
    }
}

/// Monthly trend chart: predictions as a line, conversions as bars.
pub fn trend_spec() -> Value {
    json!({
        "data": [
            {
                "type": "scatter",
                "mode": "lines+markers",
                "name": "Total Predictions",
                "x": ["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
                "y": [120, 145, 210, 180, 250, 195],
                "line": { "color": "#4ECDC4", "width": 3 }
            },
            {
                "type": "bar",
                "name": "Conversions",
                "x": ["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
                "y": [35, 42, 68, 54, 85, 62],
                "marker": { "color": "#FF6B6B" }
            }
        ],
        "layout": {
            "title": "Monthly Prediction Trends",
            "xaxis": { "title": "Month" },
            "yaxis": { "title": "Count" },
            "height": 400,
            "margin": { "l": 20, "r": 20, "t": 50, "b": 20 }
        }
    })
}
