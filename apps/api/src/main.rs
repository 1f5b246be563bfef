mod admin;
mod coaching;
mod config;
mod db;
mod engagement;
mod errors;
mod intent;
mod interview;
mod llm_client;
mod models;
mod retrieval;
mod routes;
mod scoring;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::coaching::CoachingAdvisor;
use crate::config::{Config, ScoringStrategy};
use crate::db::create_pool;
use crate::intent::LlmIntentClassifier;
use crate::interview::question_gen::LlmQuestionGenerator;
use crate::interview::{Interviewer, InterviewerConfig};
use crate::llm_client::LlmClient;
use crate::retrieval::HttpPassageRetriever;
use crate::routes::build_router;
use crate::scoring::{AnswerScorer, HeuristicScorer, LlmScorer};
use crate::state::AppState;
use crate::store::{InterviewStore, PgInterviewStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Viva API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Append-only audit store
    let store: Arc<dyn InterviewStore> = Arc::new(PgInterviewStore::new(db.clone()));

    // Retrieval collaborator (external vector-store service)
    let retriever = Arc::new(HttpPassageRetriever::new(config.retriever_url.clone()));

    // Rubric scorer (HeuristicScorer by default — swap via SCORING_STRATEGY=model)
    let scorer: Arc<dyn AnswerScorer> = match config.scoring_strategy {
        ScoringStrategy::Heuristic => {
            Arc::new(HeuristicScorer::new(config.rubric_weights.clone()))
        }
        ScoringStrategy::Model => {
            Arc::new(LlmScorer::new(llm.clone(), config.rubric_weights.clone()))
        }
    };
    info!("Rubric scorer initialized ({:?})", config.scoring_strategy);

    // Session orchestrator with injected collaborators
    let interviewer = Interviewer::new(
        store.clone(),
        retriever,
        scorer,
        Arc::new(LlmIntentClassifier::new(llm.clone())),
        Arc::new(LlmQuestionGenerator::new(llm)),
        CoachingAdvisor::new(),
        InterviewerConfig {
            tone_strategy: config.tone_strategy,
            sample_window: config.sample_window,
            retrieval_k: config.retrieval_k,
            degradable_timeout: Duration::from_secs(config.collaborator_timeout_secs),
            ..InterviewerConfig::default()
        },
    );

    // Build app state
    let state = AppState {
        db,
        store,
        interviewer: Arc::new(interviewer),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
