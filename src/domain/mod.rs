// Feature schema and typed input records
pub mod features;

// Fitted prediction pipeline (preprocessing + classifier)
pub mod ml;

// Per-request prediction output
pub mod prediction;

// Domain-specific error types
pub mod errors;
