//! Router-level tests over the assembled service.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use carprice_api::{ApiConfig, ApiServer, CarCatalog, CarMakeModel};
use carprice_core::ModelRegistry;

fn server() -> ApiServer {
    let catalog = CarCatalog::from_entries(vec![CarMakeModel {
        make: "Toyota".to_string(),
        model: "Camry".to_string(),
    }]);

    ApiServer::new(
        ApiConfig::default(),
        Arc::new(ModelRegistry::new()),
        Arc::new(catalog),
        "price-prediction",
    )
}

async fn body_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn form_page_is_served_at_the_root() {
    let response = server()
        .router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response.into_body()).await;
    assert!(page.contains("action=\"/predict\""));
    assert!(page.contains("Toyota"));
}

#[tokio::test]
async fn malformed_form_input_renders_error_page() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("make=Toyota&model=Camry&year=banana&mileage=40000"))
        .unwrap();

    let response = server().router().oneshot(request).await.unwrap();

    // The extractor rejection is wrapped: the user still gets a page.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let page = body_string(response.into_body()).await;
    assert!(page.contains("Something Went Wrong"));
    assert!(page.contains("could not be read"));
}

#[tokio::test]
async fn catalog_endpoint_serves_json() {
    let response = server()
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/car-models")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response.into_body()).await;
    let entries: Vec<CarMakeModel> = serde_json::from_str(&body).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].model, "Camry");
}
