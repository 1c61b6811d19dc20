use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/live", get(live))
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
}

#[derive(Serialize)]
struct LivenessResponse {
    status: &'static str,
    uptime: u64,
    started_at: String,
    timestamp: String,
}

async fn root() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

async fn live(State(state): State<AppState>) -> Json<LivenessResponse> {
    let started_at: DateTime<Utc> = state.started_at_system().into();

    Json(LivenessResponse {
        status: "healthy",
        uptime: state.uptime_seconds(),
        started_at: started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
