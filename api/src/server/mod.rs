//! API Server Module
//!
//! This module contains the server setup functionality for the API system.

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use carprice_core::ModelRegistry;

use crate::catalog::CarCatalog;
use crate::handlers::{health_check, list_car_models, predict_price, prediction_form, ApiState};
use crate::models::ApiConfig;

/// Main API server
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Shared state
    state: Arc<ApiState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(
        config: ApiConfig,
        registry: Arc<ModelRegistry>,
        catalog: Arc<CarCatalog>,
        model_name: impl Into<String>,
    ) -> Self {
        let state = Arc::new(ApiState {
            registry,
            catalog,
            model_name: model_name.into(),
            version: config.version.clone(),
        });

        Self { config, state }
    }

    /// Build the application router.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(prediction_form))
            .route("/predict", post(predict_price))
            .route("/api/car-models", get(list_car_models))
            .route("/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the API server
    pub async fn start(&self) -> Result<()> {
        info!(
            "Starting CarPrice API server on {}:{}",
            self.config.host, self.config.port
        );

        let app = self.router();

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        info!("CarPrice API server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start API server: {}", e))?;

        Ok(())
    }
}
