//! Data-quality audit over raw training rows.
//!
//! The audit is a gate on the incoming dataset, not a pipeline guarantee:
//! training proceeds on dirty data, but the counts surface in logs and the
//! test suite asserts on them.

use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::data::CarListing;

/// Minimum row count considered sufficient for training.
pub const MIN_TRAINING_ROWS: usize = 10_000;

/// Oldest acceptable model year (exclusive).
pub const MIN_MODEL_YEAR: u32 = 1950;

/// Newest acceptable model year (inclusive): next year's models are already
/// listed, anything beyond that is a data error.
pub fn max_model_year() -> u32 {
    (Utc::now().year() + 1) as u32
}

/// Counts of rows violating the expected listing invariants.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataQualityReport {
    pub rows: usize,
    pub negative_prices: usize,
    pub negative_mileages: usize,
    pub out_of_range_years: usize,
}

impl DataQualityReport {
    /// Total number of invariant violations.
    pub fn issues(&self) -> usize {
        self.negative_prices + self.negative_mileages + self.out_of_range_years
    }

    /// True when no row violates an invariant and the dataset is large
    /// enough to train on.
    pub fn is_clean(&self, min_rows: usize) -> bool {
        self.issues() == 0 && self.rows > min_rows
    }
}

/// Audit every row against the listing invariants.
pub fn audit_listings(rows: &[CarListing]) -> DataQualityReport {
    let max_year = max_model_year();
    let mut report = DataQualityReport {
        rows: rows.len(),
        ..Default::default()
    };

    for row in rows {
        if row.price < 0.0 {
            report.negative_prices += 1;
        }
        if row.mileage < 0.0 {
            report.negative_mileages += 1;
        }
        if row.year <= MIN_MODEL_YEAR || row.year > max_year {
            report.out_of_range_years += 1;
        }
    }

    report
}
