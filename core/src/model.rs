//! Inference entry point over a fitted pipeline and regression coefficients.

use chrono::{DateTime, Utc};
use ndarray::Array1;
use uuid::Uuid;

use crate::artifact::ModelSchema;
use crate::data::PredictionRequest;
use crate::error::PipelineError;
use crate::pipeline::FittedFeaturePipeline;
use crate::trainer::EvaluationReport;

/// A trained price model: the fitted feature pipeline plus the regression
/// coefficients extracted from the estimator.
///
/// All state is read-only after construction, so one instance can serve any
/// number of concurrent callers behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct PriceModel {
    id: Uuid,
    created_at: DateTime<Utc>,
    schema: ModelSchema,
    pipeline: FittedFeaturePipeline,
    weights: Array1<f64>,
    intercept: f64,
    metrics: Option<EvaluationReport>,
}

impl PriceModel {
    pub(crate) fn new(
        pipeline: FittedFeaturePipeline,
        weights: Array1<f64>,
        intercept: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            schema: ModelSchema::car_listings(),
            pipeline,
            weights,
            intercept,
            metrics: None,
        }
    }

    /// Rebuild a model from persisted parts; used by artifact loading.
    pub(crate) fn from_parts(
        id: Uuid,
        created_at: DateTime<Utc>,
        schema: ModelSchema,
        pipeline: FittedFeaturePipeline,
        weights: Array1<f64>,
        intercept: f64,
        metrics: Option<EvaluationReport>,
    ) -> Self {
        Self {
            id,
            created_at,
            schema,
            pipeline,
            weights,
            intercept,
            metrics,
        }
    }

    /// Predict the price for one request.
    ///
    /// The model is fit on log1p-transformed prices, so the linear score is
    /// mapped back through expm1; the floor at zero covers the corner where
    /// an extreme input pushes the score below the origin.
    pub fn predict(&self, request: &PredictionRequest) -> Result<f64, PipelineError> {
        let features = self.pipeline.transform_request(request)?;
        let score = features.dot(&self.weights) + self.intercept;
        Ok(score.exp_m1().max(0.0))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Evaluation metrics captured at training time, if any.
    pub fn metrics(&self) -> Option<&EvaluationReport> {
        self.metrics.as_ref()
    }

    pub(crate) fn set_metrics(&mut self, metrics: EvaluationReport) {
        self.metrics = Some(metrics);
    }

    pub fn n_features(&self) -> usize {
        self.pipeline.n_features()
    }

    pub(crate) fn pipeline(&self) -> &FittedFeaturePipeline {
        &self.pipeline
    }

    pub(crate) fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub(crate) fn intercept(&self) -> f64 {
        self.intercept
    }
}
