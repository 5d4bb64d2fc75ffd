//! Prediction engine: the single in-process model instance.

use crate::domain::errors::PipelineError;
use crate::domain::features::FeatureRecord;
use crate::domain::ml::Pipeline;
use crate::domain::prediction::PredictionResult;
use std::path::PathBuf;
use tracing::info;

/// Wraps the pipeline loaded from the serialized artifact. Constructed once
/// at process start and shared read-only across all requests; inference is
/// a pure read, so no locking is needed.
#[derive(Debug)]
pub struct PredictionEngine {
    pipeline: Pipeline,
    model_path: PathBuf,
}

impl PredictionEngine {
    /// Loads the artifact. Failure here is fatal for the server: there is
    /// no serving without a valid model.
    pub fn load(model_path: PathBuf) -> Result<Self, PipelineError> {
        let pipeline = Pipeline::load(&model_path)?;
        info!(
            "Loaded model artifact from {:?} ({} feature columns)",
            model_path,
            pipeline.n_features()
        );
        Ok(Self {
            pipeline,
            model_path,
        })
    }

    pub fn from_pipeline(pipeline: Pipeline, model_path: PathBuf) -> Self {
        Self {
            pipeline,
            model_path,
        }
    }

    pub fn predict(&self, record: &FeatureRecord) -> Result<PredictionResult, PipelineError> {
        let (label, proba) = self.pipeline.predict(record)?;
        Ok(PredictionResult::from_proba(label, proba))
    }

    pub fn model_path(&self) -> &PathBuf {
        &self.model_path
    }
}
