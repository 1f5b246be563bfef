use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::interview::Interviewer;
use crate::store::InterviewStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pool handle kept for operational endpoints; all interview access goes
    /// through `store`.
    #[allow(dead_code)]
    pub db: PgPool,
    /// Append-only audit store, shared with the orchestrator.
    pub store: Arc<dyn InterviewStore>,
    /// The session orchestrator with its injected collaborators.
    pub interviewer: Arc<Interviewer>,
    #[allow(dead_code)]
    pub config: Config,
}
