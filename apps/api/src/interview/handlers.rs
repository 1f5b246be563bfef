use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::{AskRequest, AskResponse};
use crate::models::labels::{Emotion, Gaze};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub job_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: Uuid,
}

/// POST /api/v1/interview/sessions
pub async fn handle_start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>, AppError> {
    let session = state
        .interviewer
        .start_session(req.candidate_name, req.job_role)
        .await?;
    Ok(Json(StartSessionResponse {
        session_id: session.id,
    }))
}

/// POST /api/v1/interview/ask
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let response = state.interviewer.handle_utterance(req).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct BehaviorLogRequest {
    pub session_id: Uuid,
    pub emotion: String,
    pub face_present: bool,
    pub gaze_direction: String,
}

#[derive(Debug, Serialize)]
pub struct BehaviorLogResponse {
    pub status: &'static str,
    pub engagement_score: f64,
}

/// POST /api/v1/interview/behavior
///
/// The perception boundary: emotion and gaze labels are validated against
/// the fixed enumerations before any score is derived.
pub async fn handle_log_behavior(
    State(state): State<AppState>,
    Json(req): Json<BehaviorLogRequest>,
) -> Result<Json<BehaviorLogResponse>, AppError> {
    let emotion: Emotion = req.emotion.parse().map_err(AppError::Validation)?;
    let gaze: Gaze = req.gaze_direction.parse().map_err(AppError::Validation)?;

    let sample = state
        .interviewer
        .log_sample(req.session_id, emotion, req.face_present, gaze)
        .await?;

    Ok(Json(BehaviorLogResponse {
        status: "ok",
        engagement_score: sample.engagement_score,
    }))
}
