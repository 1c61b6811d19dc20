use axum::extract::State;
use axum::Json;

use birdbrain_algo::Exercise;

use crate::state::AppState;

pub(super) async fn list(State(state): State<AppState>) -> Json<Vec<Exercise>> {
    Json(state.catalog().exercises().to_vec())
}
