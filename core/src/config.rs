//! Configuration structs for training and data loading.
//!
//! Every recognized option is an explicit field with a default; paths are
//! supplied by the caller (CLI flags at the binary level) and never guessed.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Options for reading the delimited training data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Whether the first record is a header row.
    pub has_headers: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

/// Configuration for a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Fraction of rows held out for evaluation.
    pub test_fraction: f64,
    /// Number of cross-validation folds.
    pub folds: usize,
    /// Seed for the shuffled split and fold assignment.
    pub seed: u64,
    /// L2 penalty applied by the estimator.
    pub penalty: f64,
    /// Iteration cap for the estimator's coordinate descent.
    pub max_iterations: u32,
    /// Convergence tolerance for the estimator.
    pub tolerance: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            folds: 5,
            seed: 42,
            penalty: 0.01,
            max_iterations: 1_000,
            tolerance: 1e-6,
        }
    }
}

impl TrainingConfig {
    /// Reject configurations that cannot produce a usable split.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            bail!(
                "test_fraction must be strictly between 0 and 1, got {}",
                self.test_fraction
            );
        }
        if self.folds < 2 {
            bail!("cross-validation requires at least 2 folds, got {}", self.folds);
        }
        if !(self.penalty >= 0.0) {
            bail!("penalty must be non-negative, got {}", self.penalty);
        }
        if !(self.tolerance > 0.0) {
            bail!("tolerance must be positive, got {}", self.tolerance);
        }
        Ok(())
    }
}
