//! Append-only interview audit store.
//!
//! Turns and engagement samples are INSERTed, never UPDATEd or DELETEd —
//! the store is the audit trail of the interview. Sessions are independent;
//! no operation here spans more than one record.

pub mod pg;

pub use pg::PgInterviewStore;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::interview::{EngagementSampleRow, NewSample, NewTurn, SessionRow, TurnRow};

#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn create_session(
        &self,
        candidate_name: Option<String>,
        job_role: Option<String>,
    ) -> Result<SessionRow>;

    async fn get_session(&self, session_id: Uuid) -> Result<Option<SessionRow>>;

    /// All sessions, newest first.
    async fn list_sessions(&self) -> Result<Vec<SessionRow>>;

    /// Appends a turn, assigning the next ordinal within the session.
    async fn append_turn(&self, turn: NewTurn) -> Result<TurnRow>;

    /// Appends a perception sample with its derived engagement score.
    async fn append_sample(&self, sample: NewSample) -> Result<EngagementSampleRow>;

    /// The last `limit` samples for a session, most recent first.
    async fn recent_samples(&self, session_id: Uuid, limit: usize)
        -> Result<Vec<EngagementSampleRow>>;

    /// All turns for a session in chronological (ordinal) order.
    async fn recent_turns(&self, session_id: Uuid) -> Result<Vec<TurnRow>>;

    /// Chronological turns for the audit views; scored-only unless
    /// `include_unscored` is set.
    async fn turns_for_session(
        &self,
        session_id: Uuid,
        include_unscored: bool,
    ) -> Result<Vec<TurnRow>>;

    /// All samples for a session in chronological order (audit view).
    async fn samples_for_session(&self, session_id: Uuid) -> Result<Vec<EngagementSampleRow>>;
}
