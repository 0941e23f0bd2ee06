//! Named registry of loaded models.
//!
//! The registry is built once at startup, then frozen behind an `Arc` and
//! handed to whatever serves requests. Loaded models are immutable, so
//! concurrent lookups need no locking.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::artifact::{load_artifact, ModelSchema};
use crate::error::ArtifactError;
use crate::model::PriceModel;

/// Name → model map for the serving process. Supports versioned names even
/// though a deployment typically registers a single model.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<PriceModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an in-memory model under `name`, replacing any previous
    /// entry with that name.
    pub fn insert(&mut self, name: impl Into<String>, model: PriceModel) {
        let name = name.into();
        info!("registering model {} as '{name}'", model.id());
        self.models.insert(name, Arc::new(model));
    }

    /// Load an artifact from disk and register it under `name`.
    pub fn load_from_artifact(
        &mut self,
        name: impl Into<String>,
        path: &Path,
        expected_schema: &ModelSchema,
    ) -> Result<(), ArtifactError> {
        let model = load_artifact(path, expected_schema)?;
        self.insert(name, model);
        Ok(())
    }

    /// Look up a model by name. The returned handle is cheap to clone and
    /// shares the underlying model.
    pub fn get(&self, name: &str) -> Option<Arc<PriceModel>> {
        self.models.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_of_unknown_name_is_none() {
        let registry = ModelRegistry::new();
        assert!(registry.get("price-prediction").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn load_from_missing_artifact_fails() {
        let mut registry = ModelRegistry::new();
        let result = registry.load_from_artifact(
            "price-prediction",
            Path::new("/nonexistent/model.bin"),
            &ModelSchema::car_listings(),
        );
        assert!(matches!(result, Err(ArtifactError::NotFound(_))));
        assert!(registry.is_empty());
    }
}
