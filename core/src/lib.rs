//! Car-price model training and serving primitives.
//!
//! The crate covers the full offline-to-online path: typed CSV loading, a
//! fit-once feature pipeline (one-hot encoding, concatenation, min-max
//! normalization), estimator orchestration over `linfa-elasticnet`, a versioned
//! persistence artifact, and a read-only model registry for serving.

pub mod artifact;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod trainer;
pub mod validation;

// Re-export the types callers touch directly.
pub use artifact::{load_artifact, save_artifact, ModelSchema, ARTIFACT_FORMAT_VERSION};
pub use config::{LoaderConfig, TrainingConfig};
pub use data::{load_listings, load_listings_with, train_test_split, CarListing, PredictionRequest};
pub use error::{ArtifactError, DataError, PipelineError};
pub use model::PriceModel;
pub use pipeline::{FeaturePipeline, FittedFeaturePipeline};
pub use registry::ModelRegistry;
pub use trainer::{
    cross_validate, r_squared, train_price_model, CrossValidationReport, EvaluationReport,
    TrainingOutcome,
};
pub use validation::{audit_listings, DataQualityReport, MIN_TRAINING_ROWS};
