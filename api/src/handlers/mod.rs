//! API Handlers Module
//!
//! Request handlers for the prediction pages, the reference lookup, and
//! the health check.

use axum::{
    debug_handler,
    extract::rejection::FormRejection,
    extract::{Form, State},
    http::StatusCode,
    response::{Html, Json},
};
use std::collections::HashMap;
use std::sync::Arc;

use carprice_core::{ModelRegistry, PredictionRequest};

use crate::catalog::{CarCatalog, CarMakeModel};
use crate::models::PriceForm;
use crate::pages;

/// Represents the state of the API server
pub struct ApiState {
    /// Loaded models, read-only after startup
    pub registry: Arc<ModelRegistry>,
    /// Make/model reference catalog
    pub catalog: Arc<CarCatalog>,
    /// Registry name of the model serving predictions
    pub model_name: String,
    /// Service version reported by the health check
    pub version: String,
}

/// Health check endpoint
#[debug_handler]
pub async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HashMap<String, String>> {
    let mut response = HashMap::new();
    response.insert("status".to_string(), "healthy".to_string());
    response.insert("service".to_string(), "carprice-api".to_string());
    response.insert("version".to_string(), state.version.clone());
    Json(response)
}

/// The prediction form
#[debug_handler]
pub async fn prediction_form(State(state): State<Arc<ApiState>>) -> Html<String> {
    Html(pages::prediction_form_page(&state.catalog))
}

/// Score a form submission and render the result page.
///
/// Every failure path renders an error page rather than a bare status, so
/// malformed input or a missing model never leaves the user with a blank
/// response.
#[debug_handler]
pub async fn predict_price(
    State(state): State<Arc<ApiState>>,
    form: Result<Form<PriceForm>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::warn!("rejected form submission: {}", rejection);
            return (
                StatusCode::BAD_REQUEST,
                Html(pages::error_page(
                    "The submitted values could not be read. Check the fields and try again.",
                )),
            );
        }
    };

    tracing::debug!(
        "scoring {} {} {} at {} miles",
        form.year,
        form.make,
        form.model,
        form.mileage
    );

    let model = match state.registry.get(&state.model_name) {
        Some(model) => model,
        None => {
            tracing::error!("model '{}' is not registered", state.model_name);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::error_page(
                    "No prediction model is loaded. Try again later.",
                )),
            );
        }
    };

    let request = PredictionRequest {
        year: form.year,
        mileage: form.mileage,
        make: form.make.clone(),
        model: form.model.clone(),
    };

    match model.predict(&request) {
        Ok(price) => (
            StatusCode::OK,
            Html(pages::prediction_result_page(&form, price)),
        ),
        Err(e) => {
            tracing::error!("prediction failed: {}", e);
            (
                StatusCode::OK,
                Html(pages::error_page(
                    "The submitted values could not be scored. Check the fields and try again.",
                )),
            )
        }
    }
}

/// List the make/model reference entries as JSON
#[debug_handler]
pub async fn list_car_models(State(state): State<Arc<ApiState>>) -> Json<Vec<CarMakeModel>> {
    Json(state.catalog.all().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carprice_core::{train_price_model, CarListing, TrainingConfig};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn listings(n: usize) -> Vec<CarListing> {
        let mut rng = StdRng::seed_from_u64(5);
        let pairs = [("Toyota", "Camry"), ("Honda", "Civic"), ("Ford", "Focus")];
        (0..n)
            .map(|_| {
                let (make, model) = pairs[rng.gen_range(0..pairs.len())];
                let year: u32 = rng.gen_range(2005..=2020);
                let mileage: f64 = rng.gen_range(10_000.0..150_000.0);
                let log_price =
                    9.0 + 0.04 * f64::from(year - 2005) - 5e-6 * mileage + rng.gen_range(-0.05..0.05);
                CarListing {
                    year,
                    mileage,
                    make: make.to_string(),
                    model: model.to_string(),
                    price: log_price.exp_m1(),
                }
            })
            .collect()
    }

    fn state() -> Arc<ApiState> {
        let outcome = train_price_model(&listings(200), &TrainingConfig::default()).unwrap();
        let mut registry = ModelRegistry::new();
        registry.insert("price-prediction", outcome.model);

        let catalog = CarCatalog::from_entries(vec![CarMakeModel {
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
        }]);

        Arc::new(ApiState {
            registry: Arc::new(registry),
            catalog: Arc::new(catalog),
            model_name: "price-prediction".to_string(),
            version: "1.0.0".to_string(),
        })
    }

    #[tokio::test]
    async fn form_submission_renders_a_price() {
        let form = PriceForm {
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2015,
            mileage: 40_000.0,
        };

        let (status, Html(page)) = predict_price(State(state()), Ok(Form(form))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Estimated Price"));
        assert!(page.contains("$"));
    }

    #[tokio::test]
    async fn unknown_pairing_still_renders_a_price() {
        let form = PriceForm {
            make: "Zonda".to_string(),
            model: "Nowhere".to_string(),
            year: 2012,
            mileage: 90_000.0,
        };

        let (status, Html(page)) = predict_price(State(state()), Ok(Form(form))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Estimated Price"));
    }

    #[tokio::test]
    async fn missing_model_renders_an_error_page() {
        let state = Arc::new(ApiState {
            registry: Arc::new(ModelRegistry::new()),
            catalog: Arc::new(CarCatalog::default()),
            model_name: "price-prediction".to_string(),
            version: "1.0.0".to_string(),
        });
        let form = PriceForm {
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2015,
            mileage: 40_000.0,
        };

        // The status still signals the fault, but the body is a page the
        // user can act on, not bare text.
        let (status, Html(page)) = predict_price(State(state), Ok(Form(form))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(page.contains("Something Went Wrong"));
        assert!(page.contains("No prediction model is loaded"));
    }

    #[tokio::test]
    async fn catalog_lookup_returns_entries() {
        let Json(entries) = list_car_models(State(state())).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].make, "Toyota");
    }

    #[tokio::test]
    async fn health_reports_service_version() {
        let Json(payload) = health_check(State(state())).await;
        assert_eq!(payload.get("status").map(String::as_str), Some("healthy"));
        assert_eq!(payload.get("version").map(String::as_str), Some("1.0.0"));
    }
}
