//! Read-only audit endpoints for the reviewer dashboard.
//!
//! These never mutate anything: the interview log is append-only and the
//! admin surface is a pure read model over it.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::{EngagementSampleRow, SessionRow, TurnRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct QaLogQuery {
    pub session_id: Uuid,
    #[serde(default)]
    pub include_unscored: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionRow>,
}

#[derive(Debug, Serialize)]
pub struct QaLogResponse {
    pub qa_log: Vec<TurnRow>,
}

#[derive(Debug, Serialize)]
pub struct BehaviorLogsResponse {
    pub logs: Vec<EngagementSampleRow>,
}

/// GET /api/v1/admin/sessions
pub async fn handle_list_sessions(
    State(state): State<AppState>,
) -> Result<Json<SessionsResponse>, AppError> {
    let sessions = state.store.list_sessions().await.map_err(AppError::Internal)?;
    Ok(Json(SessionsResponse { sessions }))
}

/// GET /api/v1/admin/qa-log?session_id=&include_unscored=
pub async fn handle_qa_log(
    State(state): State<AppState>,
    Query(params): Query<QaLogQuery>,
) -> Result<Json<QaLogResponse>, AppError> {
    let qa_log = state
        .store
        .turns_for_session(params.session_id, params.include_unscored)
        .await
        .map_err(AppError::Internal)?;
    if qa_log.is_empty() {
        return Err(AppError::NotFound(
            "No answers found for this session".to_string(),
        ));
    }
    Ok(Json(QaLogResponse { qa_log }))
}

/// GET /api/v1/admin/behavior-logs?session_id=
pub async fn handle_behavior_logs(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<BehaviorLogsResponse>, AppError> {
    let logs = state
        .store
        .samples_for_session(params.session_id)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(BehaviorLogsResponse { logs }))
}
