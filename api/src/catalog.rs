//! Make/model reference catalog.
//!
//! The catalog backs the prediction form and the JSON lookup endpoint. It
//! is read once at startup and is independent of the vocabularies the
//! model was trained on; a pairing the model never saw still scores,
//! through the zero encoding for unseen categories.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One make/model pairing offered to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarMakeModel {
    pub make: String,
    pub model: String,
}

/// The full reference list, loaded from a JSON array of [`CarMakeModel`]
/// records.
#[derive(Debug, Clone, Default)]
pub struct CarCatalog {
    entries: Vec<CarMakeModel>,
}

impl CarCatalog {
    pub fn from_entries(entries: Vec<CarMakeModel>) -> Self {
        Self { entries }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        let entries: Vec<CarMakeModel> = serde_json::from_str(&raw)
            .with_context(|| format!("catalog file {} is not a valid entry list", path.display()))?;

        info!("loaded {} catalog entries from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    pub fn all(&self) -> &[CarMakeModel] {
        &self.entries
    }

    /// Distinct makes in entry order.
    pub fn makes(&self) -> Vec<&str> {
        let mut makes: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !makes.contains(&entry.make.as_str()) {
                makes.push(&entry.make);
            }
        }
        makes
    }

    /// Models listed under the given make.
    pub fn models_for(&self, make: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.make == make)
            .map(|e| e.model.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
