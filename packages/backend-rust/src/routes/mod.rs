mod exercises;
mod health;
mod learning;
mod session;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::response::json_error;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/exercises", get(exercises::list).fallback(fallback_handler))
        .route("/answer", post(learning::submit_answer).fallback(fallback_handler))
        .route("/next", post(learning::next_exercise).fallback(fallback_handler))
        .route("/session", get(session::snapshot).fallback(fallback_handler))
        .route("/session/reset", post(session::reset).fallback(fallback_handler))
        .nest("/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found").into_response()
}
