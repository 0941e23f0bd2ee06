//! Typed loading of car listing data and partitioning helpers.

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::LoaderConfig;
use crate::error::DataError;

/// One training record: a used-car listing with its sale price label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarListing {
    #[serde(rename = "Year")]
    pub year: u32,
    #[serde(rename = "Mileage")]
    pub mileage: f64,
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Price")]
    pub price: f64,
}

impl CarListing {
    /// Strip the price label, leaving the fields a caller supplies at
    /// inference time.
    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            year: self.year,
            mileage: self.mileage,
            make: self.make.clone(),
            model: self.model.clone(),
        }
    }
}

/// Inference input: a [`CarListing`] without its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub year: u32,
    pub mileage: f64,
    pub make: String,
    pub model: String,
}

/// Load listings from a delimited text file using the default options
/// (comma separator, header row present).
pub fn load_listings(path: &Path) -> Result<Vec<CarListing>, DataError> {
    load_listings_with(path, &LoaderConfig::default())
}

/// Load listings with explicit delimiter and header options.
///
/// Extra columns in the file are ignored; the named columns must coerce to
/// their declared types or loading fails with [`DataError::Parse`] carrying
/// the offending line number.
pub fn load_listings_with(path: &Path, options: &LoaderConfig) -> Result<Vec<CarListing>, DataError> {
    if !path.exists() {
        return Err(DataError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<CarListing>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                return Err(DataError::Parse {
                    line,
                    message: e.to_string(),
                });
            }
        }
    }

    if rows.is_empty() {
        return Err(DataError::Empty);
    }

    info!("loaded {} listings from {}", rows.len(), path.display());
    Ok(rows)
}

/// Split rows into a training and a held-out partition.
///
/// Indices are shuffled with a seeded generator so a given seed always
/// produces the same partitioning.
pub fn train_test_split(
    rows: &[CarListing],
    test_fraction: f64,
    seed: u64,
) -> (Vec<CarListing>, Vec<CarListing>) {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = (rows.len() as f64 * test_fraction).round() as usize;
    let (test_idx, train_idx) = indices.split_at(test_len.min(rows.len()));

    let train = train_idx.iter().map(|&i| rows[i].clone()).collect();
    let test = test_idx.iter().map(|&i| rows[i].clone()).collect();
    (train, test)
}
