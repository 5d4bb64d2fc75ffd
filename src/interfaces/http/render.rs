//! Minimal server-side HTML rendering.
//!
//! Thin glue: pages are assembled from the feature schema and the chart
//! specs; all charting happens client-side from the embedded JSON.

use crate::application::dashboard::DashboardStats;
use crate::application::presentation::PredictionView;
use crate::domain::features::schema;
use serde_json::Value;
use std::fmt::Write;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

fn shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} · bankcast</title>\n<script src=\"{PLOTLY_CDN}\"></script>\n\
         </head>\n<body>\n<nav><a href=\"/\">Home</a> | <a href=\"/predict\">Predict</a> | \
         <a href=\"/dashboard\">Dashboard</a></nav>\n{body}\n</body>\n</html>\n"
    )
}

pub fn index_page() -> String {
    let mut body = String::from(
        "<h1>Bank Marketing Subscription Predictor</h1>\n\
         <p>Predicts whether a client will subscribe to a term deposit, from \
         the 16 campaign features below.</p>\n<h2>Model inputs</h2>\n<ul>\n",
    );
    for feature in schema::CATEGORICAL_FEATURES {
        let _ = writeln!(
            body,
            "<li><b>{}</b>: {}</li>",
            feature.name,
            feature.values.join(", ")
        );
    }
    for feature in schema::NUMERICAL_FEATURES {
        let _ = writeln!(
            body,
            "<li><b>{}</b>: {} to {} (default {})</li>",
            feature.name, feature.min, feature.max, feature.default
        );
    }
    body.push_str("</ul>\n<p><a href=\"/predict\">Make a prediction</a></p>");
    shell("Home", &body)
}

pub fn form_page() -> String {
    let mut body = String::from("<h1>Predict Subscription</h1>\n<form method=\"post\" action=\"/predict\">\n");
    for feature in schema::CATEGORICAL_FEATURES {
        let _ = writeln!(body, "<label>{}<select name=\"{}\">", feature.name, feature.name);
        for value in feature.values {
            let _ = writeln!(body, "<option value=\"{value}\">{value}</option>");
        }
        body.push_str("</select></label><br>\n");
    }
    for feature in schema::NUMERICAL_FEATURES {
        let _ = writeln!(
            body,
            "<label>{name}<input type=\"number\" name=\"{name}\" min=\"{min}\" max=\"{max}\" \
             value=\"{default}\" step=\"any\"></label><br>",
            name = feature.name,
            min = feature.min,
            max = feature.max,
            default = feature.default,
        );
    }
    body.push_str("<button type=\"submit\">Predict</button>\n</form>");
    shell("Predict", &body)
}

pub fn results_page(view: &PredictionView) -> String {
    let verdict = if view.label == 1 {
        "Will subscribe"
    } else {
        "Will not subscribe"
    };
    let body = format!(
        "<h1>Prediction Result</h1>\n\
         <p><b>{verdict}</b></p>\n\
         <p>Subscription probability: {probability:.1}%</p>\n\
         <p>Confidence: {confidence:.1}%</p>\n\
         <div id=\"gauge\"></div>\n<div id=\"bar\"></div>\n\
         <script>\nconst gauge = {gauge};\nconst bar = {bar};\n\
         Plotly.newPlot('gauge', gauge.data, gauge.layout);\n\
         Plotly.newPlot('bar', bar.data, bar.layout);\n</script>\n\
         <p><a href=\"/predict\">New prediction</a></p>",
        probability = view.probability,
        confidence = view.confidence,
        gauge = view.gauge,
        bar = view.bar,
    );
    shell("Results", &body)
}

pub fn dashboard_page(stats: &DashboardStats, trend: &Value) -> String {
    let body = format!(
        "<h1>Analytics Dashboard</h1>\n\
         <p>Sample data — not backed by live prediction history.</p>\n<ul>\n\
         <li>Total predictions: {total}</li>\n\
         <li>Positive rate: {positive:.1}%</li>\n\
         <li>Average confidence: {avg:.1}%</li>\n\
         <li>Top job: {job}</li>\n\
         <li>Most contacted month: {month}</li>\n</ul>\n\
         <div id=\"trend\"></div>\n\
         <script>\nconst trend = {trend};\nPlotly.newPlot('trend', trend.data, trend.layout);\n</script>",
        total = stats.total_predictions,
        positive = stats.positive_rate,
        avg = stats.avg_confidence,
        job = stats.top_job,
        month = stats.most_contacted_month,
    );
    shell("Dashboard", &body)
}
