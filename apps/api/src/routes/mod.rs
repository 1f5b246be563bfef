pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::admin;
use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API
        .route(
            "/api/v1/interview/sessions",
            post(handlers::handle_start_session),
        )
        .route("/api/v1/interview/ask", post(handlers::handle_ask))
        .route(
            "/api/v1/interview/behavior",
            post(handlers::handle_log_behavior),
        )
        // Admin audit API (read-only)
        .route("/api/v1/admin/sessions", get(admin::handle_list_sessions))
        .route("/api/v1/admin/qa-log", get(admin::handle_qa_log))
        .route(
            "/api/v1/admin/behavior-logs",
            get(admin::handle_behavior_logs),
        )
        .with_state(state)
}
