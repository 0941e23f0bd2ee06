//! Feature pipeline: categorical encoding, concatenation, normalization.
//!
//! The pipeline is fit exactly once on the training partition. The fitted
//! parameters are then reused verbatim for the held-out partition and for
//! live inference; nothing here refits on apply. That single property is
//! what keeps training-time and serving-time feature vectors consistent.
//!
//! Feature vector layout: `[year, mileage, make one-hot…, model one-hot…]`,
//! min-max normalized as a whole after concatenation.

pub mod encoding;
pub mod scaling;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{CarListing, PredictionRequest};
use crate::error::PipelineError;

pub use encoding::{FittedOneHotEncoder, OneHotEncoder, OneHotParams};
pub use scaling::{FittedMinMaxScaler, MinMaxParams, MinMaxScaler};

/// Number of raw numeric columns ahead of the one-hot blocks.
const NUMERIC_FEATURES: usize = 2;

/// Declarative description of the transform chain; [`fit`](Self::fit)
/// produces the reusable fitted state.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeaturePipeline;

impl FeaturePipeline {
    /// Fit the whole chain on the training partition.
    pub fn fit(rows: &[CarListing]) -> Result<FittedFeaturePipeline, PipelineError> {
        if rows.is_empty() {
            return Err(PipelineError::EmptyData);
        }

        let make_encoder = OneHotEncoder::fit(rows.iter().map(|r| r.make.as_str()))?;
        let model_encoder = OneHotEncoder::fit(rows.iter().map(|r| r.model.as_str()))?;

        let mut pipeline = FittedFeaturePipeline {
            make_encoder,
            model_encoder,
            scaler: None,
        };

        let raw = pipeline.assemble(rows);
        pipeline.scaler = Some(MinMaxScaler::fit(&raw)?);

        debug!(
            "fitted feature pipeline: {} make categories, {} model categories, {} features",
            pipeline.make_encoder.width(),
            pipeline.model_encoder.width(),
            pipeline.n_features()
        );
        Ok(pipeline)
    }
}

/// Fitted pipeline state: vocabularies and normalization bounds. Immutable
/// after fitting and safe to share across threads.
#[derive(Debug, Clone)]
pub struct FittedFeaturePipeline {
    make_encoder: FittedOneHotEncoder,
    model_encoder: FittedOneHotEncoder,
    // Only `None` mid-fit; always present on a pipeline handed to callers.
    scaler: Option<FittedMinMaxScaler>,
}

/// Serializable parameters of a [`FittedFeaturePipeline`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineParams {
    pub make: OneHotParams,
    pub model: OneHotParams,
    pub scaler: MinMaxParams,
}

impl FittedFeaturePipeline {
    /// Width of the transformed feature vector.
    pub fn n_features(&self) -> usize {
        NUMERIC_FEATURES + self.make_encoder.width() + self.model_encoder.width()
    }

    /// Vocabulary learned for the make column.
    pub fn makes(&self) -> &[String] {
        self.make_encoder.categories()
    }

    /// Vocabulary learned for the model column.
    pub fn models(&self) -> &[String] {
        self.model_encoder.categories()
    }

    /// Transform a batch of rows into normalized feature vectors.
    pub fn transform(&self, rows: &[CarListing]) -> Result<Array2<f64>, PipelineError> {
        if rows.is_empty() {
            return Ok(Array2::zeros((0, self.n_features())));
        }
        let raw = self.assemble(rows);
        self.scaler().transform(&raw)
    }

    /// Transform one inference request into a normalized feature vector.
    pub fn transform_request(
        &self,
        request: &PredictionRequest,
    ) -> Result<Array1<f64>, PipelineError> {
        let mut features = vec![0.0; self.n_features()];
        self.write_raw(
            request.year,
            request.mileage,
            &request.make,
            &request.model,
            &mut features,
        );
        self.scaler().transform_row(&mut features)?;
        Ok(Array1::from(features))
    }

    pub fn params(&self) -> PipelineParams {
        PipelineParams {
            make: self.make_encoder.params(),
            model: self.model_encoder.params(),
            scaler: self.scaler().params(),
        }
    }

    pub fn from_params(params: PipelineParams) -> Self {
        Self {
            make_encoder: FittedOneHotEncoder::from_params(params.make),
            model_encoder: FittedOneHotEncoder::from_params(params.model),
            scaler: Some(FittedMinMaxScaler::from_params(params.scaler)),
        }
    }

    fn scaler(&self) -> &FittedMinMaxScaler {
        self.scaler
            .as_ref()
            .expect("pipeline used before scaler was fitted")
    }

    /// Concatenate numeric columns and one-hot blocks, pre-normalization.
    fn assemble(&self, rows: &[CarListing]) -> Array2<f64> {
        let n = self.n_features();
        let mut raw = Array2::zeros((rows.len(), n));
        let mut buffer = vec![0.0; n];

        for (i, row) in rows.iter().enumerate() {
            buffer.iter_mut().for_each(|v| *v = 0.0);
            self.write_raw(row.year, row.mileage, &row.make, &row.model, &mut buffer);
            raw.row_mut(i)
                .iter_mut()
                .zip(&buffer)
                .for_each(|(dst, &src)| *dst = src);
        }
        raw
    }

    fn write_raw(&self, year: u32, mileage: f64, make: &str, model: &str, out: &mut [f64]) {
        out[0] = f64::from(year);
        out[1] = mileage;

        let make_end = NUMERIC_FEATURES + self.make_encoder.width();
        self.make_encoder
            .encode_into(make, &mut out[NUMERIC_FEATURES..make_end]);
        self.model_encoder.encode_into(model, &mut out[make_end..]);
    }
}
