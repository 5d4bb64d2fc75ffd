// Prediction engine wrapping the loaded model artifact
pub mod engine;

// User-facing result shaping and chart specs
pub mod presentation;

// Placeholder analytics for the dashboard page
pub mod dashboard;
