use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::labels::{Emotion, Gaze, Verdict};

/// One interview instance. Owns its turns and engagement samples; there is
/// no explicit "closed" state — a finished interview simply stops receiving
/// utterances.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionRow {
    pub id: Uuid,
    pub candidate_name: Option<String>,
    pub job_role: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One question/answer exchange, append-only.
///
/// `question` is NULL for the seed opening turns (role, intro). `score`,
/// `subscores`, and `hallucination` are NULL until a turn passes through the
/// rubric scorer; a scored turn from the degraded model-assisted path keeps
/// NULL subscores with score 0.5 and verdict "Unknown".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TurnRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub position: i32,
    pub question: Option<String>,
    pub answer: String,
    pub subscores: Option<Value>,
    pub score: Option<f64>,
    pub hallucination: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One perception tick with its derived engagement score, append-only.
/// `engagement_score` is a pure function of (emotion, face_present, gaze)
/// and is computed once at insert time — never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EngagementSampleRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub emotion: String,
    pub face_present: bool,
    pub gaze_direction: String,
    pub engagement_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Payload for appending a turn. Position and timestamps are assigned by the
/// store so ordinals always reflect acceptance order within the session.
#[derive(Debug, Clone)]
pub struct NewTurn {
    pub session_id: Uuid,
    pub question: Option<String>,
    pub answer: String,
    pub subscores: Option<Value>,
    pub score: Option<f64>,
    pub hallucination: Option<Verdict>,
}

impl NewTurn {
    /// An unscored turn — seed-phase answers that belong in the audit log
    /// but never reached the rubric scorer.
    pub fn unscored(session_id: Uuid, question: Option<String>, answer: String) -> Self {
        Self {
            session_id,
            question,
            answer,
            subscores: None,
            score: None,
            hallucination: None,
        }
    }
}

/// Payload for appending an engagement sample.
#[derive(Debug, Clone)]
pub struct NewSample {
    pub session_id: Uuid,
    pub emotion: Emotion,
    pub face_present: bool,
    pub gaze: Gaze,
    pub engagement_score: f64,
}
