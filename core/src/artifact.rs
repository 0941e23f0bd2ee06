//! Model persistence: a single self-describing artifact per training run.
//!
//! The artifact bundles the fitted transform parameters, the regression
//! coefficients, and the schema the model expects, all bincode-encoded. It
//! is written once and loaded read-only; a schema or format-version mismatch
//! on load is an error, never a silent coercion.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ArtifactError;
use crate::model::PriceModel;
use crate::pipeline::{FittedFeaturePipeline, PipelineParams};
use crate::trainer::EvaluationReport;

/// Bumped whenever the bundle layout changes incompatibly.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Role of a column in the input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Label,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    fn new(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// The input schema a model was trained against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    pub columns: Vec<ColumnSpec>,
}

impl ModelSchema {
    /// The car-listing schema used throughout this workspace.
    pub fn car_listings() -> Self {
        Self {
            columns: vec![
                ColumnSpec::new("Year", ColumnKind::Numeric),
                ColumnSpec::new("Mileage", ColumnKind::Numeric),
                ColumnSpec::new("Make", ColumnKind::Categorical),
                ColumnSpec::new("Model", ColumnKind::Categorical),
                ColumnSpec::new("Price", ColumnKind::Label),
            ],
        }
    }
}

impl fmt::Display for ModelSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// On-disk layout of the artifact.
#[derive(Serialize, Deserialize)]
struct ArtifactBundle {
    format_version: u32,
    schema: ModelSchema,
    model_id: Uuid,
    created_at: DateTime<Utc>,
    metrics: Option<EvaluationReport>,
    pipeline: PipelineParams,
    weights: Vec<f64>,
    intercept: f64,
}

/// Serialize a trained model to `path`, creating parent directories as
/// needed.
pub fn save_artifact(model: &PriceModel, path: &Path) -> Result<(), ArtifactError> {
    let bundle = ArtifactBundle {
        format_version: ARTIFACT_FORMAT_VERSION,
        schema: model.schema().clone(),
        model_id: model.id(),
        created_at: model.created_at(),
        metrics: model.metrics().cloned(),
        pipeline: model.pipeline().params(),
        weights: model.weights().to_vec(),
        intercept: model.intercept(),
    };

    let bytes = bincode::serialize(&bundle).map_err(|e| ArtifactError::Format(e.to_string()))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, &bytes)?;

    info!(
        "saved model {} ({} bytes) to {}",
        bundle.model_id,
        bytes.len(),
        path.display()
    );
    Ok(())
}

/// Reconstruct an inference-only model from `path`.
///
/// Fails with [`ArtifactError::SchemaMismatch`] when the stored schema is
/// not the one the caller expects.
pub fn load_artifact(path: &Path, expected_schema: &ModelSchema) -> Result<PriceModel, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path)?;
    let bundle: ArtifactBundle =
        bincode::deserialize(&bytes).map_err(|e| ArtifactError::Format(e.to_string()))?;

    if bundle.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(ArtifactError::UnsupportedVersion {
            found: bundle.format_version,
            supported: ARTIFACT_FORMAT_VERSION,
        });
    }
    if &bundle.schema != expected_schema {
        return Err(ArtifactError::SchemaMismatch {
            expected: expected_schema.clone(),
            found: bundle.schema,
        });
    }

    let model = PriceModel::from_parts(
        bundle.model_id,
        bundle.created_at,
        bundle.schema,
        FittedFeaturePipeline::from_params(bundle.pipeline),
        Array1::from(bundle.weights),
        bundle.intercept,
        bundle.metrics,
    );

    info!("loaded model {} from {}", model.id(), path.display());
    Ok(model)
}
