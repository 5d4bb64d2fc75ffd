use thiserror::Error;

/// Errors surfaced by the prediction pipeline, from artifact loading
/// through single-record inference.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("model artifact not found at {path}")]
    ArtifactMissing { path: String },

    #[error("failed to load model artifact from {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },

    #[error("failed to write model artifact to {path}: {reason}")]
    ArtifactWrite { path: String, reason: String },

    #[error("unknown category '{value}' for feature '{feature}'")]
    UnknownCategory { feature: String, value: String },

    #[error("feature vector shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("inference failed: {reason}")]
    Inference { reason: String },

    #[error("training failed: {reason}")]
    Training { reason: String },
}
