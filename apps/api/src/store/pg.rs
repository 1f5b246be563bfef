use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::interview::{EngagementSampleRow, NewSample, NewTurn, SessionRow, TurnRow};
use crate::store::InterviewStore;

/// PostgreSQL-backed audit store.
pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn create_session(
        &self,
        candidate_name: Option<String>,
        job_role: Option<String>,
    ) -> Result<SessionRow> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO interview_sessions (id, candidate_name, job_role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(candidate_name)
        .bind(job_role)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Option<SessionRow>> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT * FROM interview_sessions WHERE id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_sessions(&self) -> Result<Vec<SessionRow>> {
        let rows = sqlx::query_as::<_, SessionRow>(
            "SELECT * FROM interview_sessions ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn append_turn(&self, turn: NewTurn) -> Result<TurnRow> {
        // Append-only INSERT; the ordinal is computed inside the statement so
        // it reflects acceptance order within the session.
        let row = sqlx::query_as::<_, TurnRow>(
            r#"
            INSERT INTO interview_turns
                (id, session_id, position, question, answer, subscores, score, hallucination)
            SELECT $1, $2, COALESCE(MAX(position), 0) + 1, $3, $4, $5, $6, $7
            FROM interview_turns
            WHERE session_id = $2
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(turn.session_id)
        .bind(turn.question)
        .bind(turn.answer)
        .bind(turn.subscores)
        .bind(turn.score)
        .bind(turn.hallucination.map(|v| v.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn append_sample(&self, sample: NewSample) -> Result<EngagementSampleRow> {
        let row = sqlx::query_as::<_, EngagementSampleRow>(
            r#"
            INSERT INTO engagement_samples
                (id, session_id, emotion, face_present, gaze_direction, engagement_score)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sample.session_id)
        .bind(sample.emotion.as_str())
        .bind(sample.face_present)
        .bind(sample.gaze.as_str())
        .bind(sample.engagement_score)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn recent_samples(
        &self,
        session_id: Uuid,
        limit: usize,
    ) -> Result<Vec<EngagementSampleRow>> {
        let rows = sqlx::query_as::<_, EngagementSampleRow>(
            r#"
            SELECT * FROM engagement_samples
            WHERE session_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(session_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn recent_turns(&self, session_id: Uuid) -> Result<Vec<TurnRow>> {
        let rows = sqlx::query_as::<_, TurnRow>(
            r#"
            SELECT * FROM interview_turns
            WHERE session_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn turns_for_session(
        &self,
        session_id: Uuid,
        include_unscored: bool,
    ) -> Result<Vec<TurnRow>> {
        let sql = if include_unscored {
            "SELECT * FROM interview_turns WHERE session_id = $1 ORDER BY position ASC"
        } else {
            "SELECT * FROM interview_turns WHERE session_id = $1 AND score IS NOT NULL ORDER BY position ASC"
        };
        let rows = sqlx::query_as::<_, TurnRow>(sql)
            .bind(session_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn samples_for_session(&self, session_id: Uuid) -> Result<Vec<EngagementSampleRow>> {
        let rows = sqlx::query_as::<_, EngagementSampleRow>(
            r#"
            SELECT * FROM engagement_samples
            WHERE session_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
