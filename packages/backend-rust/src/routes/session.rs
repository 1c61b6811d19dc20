use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::session::SessionSnapshot;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub(super) struct ResetResponse {
    message: &'static str,
}

pub(super) async fn reset(State(state): State<AppState>) -> Json<ResetResponse> {
    state.session().reset();
    tracing::info!("session reset");

    Json(ResetResponse {
        message: "Session reset successfully",
    })
}

pub(super) async fn snapshot(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session().snapshot())
}
