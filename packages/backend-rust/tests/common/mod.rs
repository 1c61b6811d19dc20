use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use birdbrain_algo::BktParams;
use birdbrain_backend::catalog::ExerciseCatalog;
use birdbrain_backend::config::CorsOrigins;
use birdbrain_backend::state::AppState;

pub fn create_test_app() -> Router {
    let catalog = ExerciseCatalog::builtin().expect("builtin catalog");
    create_test_app_with(catalog)
}

pub fn create_test_app_with(catalog: ExerciseCatalog) -> Router {
    let state = AppState::new(catalog, BktParams::default());
    birdbrain_backend::build_app(state, &CorsOrigins::Any)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}
