use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use birdbrain_algo::sanitize::validate_latency;
use birdbrain_algo::{select_next_exercise, AnswerEvent, Exercise, MasteryVector};

use crate::response::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct AnswerRequest {
    exercise_id: String,
    correct: bool,
    latency_ms: i64,
}

impl AnswerRequest {
    fn into_event(self) -> Result<AnswerEvent, AppError> {
        Ok(AnswerEvent {
            latency_ms: validate_latency(self.latency_ms)?,
            exercise_id: self.exercise_id,
            correct: self.correct,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct MasteryResponse {
    updated_mastery: MasteryVector,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct NextExerciseRequest {
    #[serde(default)]
    exclude_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(super) struct NextExerciseResponse {
    exercise: Exercise,
    reason: String,
    mastery: MasteryVector,
}

pub(super) async fn submit_answer(
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<MasteryResponse>, AppError> {
    let event = payload.into_event()?;
    let skill = state.catalog().get(&event.exercise_id)?.skill.clone();

    let change = state
        .session()
        .record_answer(&skill, event.correct, event.latency_ms)?;

    tracing::info!(
        exercise_id = %event.exercise_id,
        %skill,
        correct = event.correct,
        latency_ms = event.latency_ms,
        before = change.before,
        after = change.after,
        "mastery updated"
    );

    Ok(Json(MasteryResponse {
        updated_mastery: change.mastery,
    }))
}

pub(super) async fn next_exercise(
    State(state): State<AppState>,
    payload: Option<Json<NextExerciseRequest>>,
) -> Result<Json<NextExerciseResponse>, AppError> {
    let request = payload.map(|Json(body)| body).unwrap_or_default();
    let exclude_ids = request.exclude_ids.unwrap_or_default();
    let candidates = state.catalog().available(&exclude_ids);

    let snapshot = state.session().snapshot();
    let selection = select_next_exercise(&candidates, &snapshot.mastery, &snapshot.recent_answers)?;

    tracing::info!(
        exercise_id = %selection.exercise.id,
        skill = %selection.target_skill,
        mastery = selection.target_mastery,
        difficulty = %selection.difficulty,
        branch = ?selection.branch,
        excluded = exclude_ids.len(),
        "next exercise selected"
    );

    Ok(Json(NextExerciseResponse {
        exercise: selection.exercise,
        reason: selection.reason,
        mastery: snapshot.mastery,
    }))
}
