//! Configuration and request types for the HTTP layer.

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Reported service version
    pub version: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Fields posted from the prediction form.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceForm {
    pub make: String,
    pub model: String,
    pub year: u32,
    pub mileage: f64,
}
