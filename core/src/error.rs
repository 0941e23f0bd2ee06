//! Error types for data loading, feature transformation, and model artifacts.

use std::path::PathBuf;
use thiserror::Error;

use crate::artifact::ModelSchema;

/// Errors raised while reading the training data file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("training data file not found: {0}")]
    FileNotFound(PathBuf),

    /// A column value could not be coerced to its declared type.
    #[error("failed to parse record at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset contains no rows")]
    Empty,
}

/// Errors raised by the feature pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot fit on empty data")]
    EmptyData,

    #[error("expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },
}

/// Errors raised while persisting or loading a model artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact is not a readable model bundle: {0}")]
    Format(String),

    #[error("unsupported artifact format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The persisted schema differs from what the caller expects. Loading
    /// stops here rather than predicting on misaligned columns.
    #[error("artifact schema mismatch: expected [{expected}], found [{found}]")]
    SchemaMismatch {
        expected: ModelSchema,
        found: ModelSchema,
    },
}
