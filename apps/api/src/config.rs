use std::str::FromStr;

use anyhow::{Context, Result};

use crate::engagement::ToneStrategy;
use crate::scoring::RubricWeights;

/// Which rubric scoring backend is wired in at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringStrategy {
    #[default]
    Heuristic,
    Model,
}

impl FromStr for ScoringStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heuristic" => Ok(ScoringStrategy::Heuristic),
            "model" => Ok(ScoringStrategy::Model),
            other => Err(format!("unknown scoring strategy '{other}'")),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub retriever_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Rubric backend: heuristic (default) or model. The heuristic default
    /// keeps the interview alive when the judgment collaborator is down.
    pub scoring_strategy: ScoringStrategy,
    /// Tone summary: engagement (default), emotion, or lexical.
    pub tone_strategy: ToneStrategy,
    pub sample_window: usize,
    pub retrieval_k: usize,
    pub collaborator_timeout_secs: u64,
    pub rubric_weights: RubricWeights,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_weights = RubricWeights::default();

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            retriever_url: require_env("RETRIEVER_URL")?,
            port: env_parse("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scoring_strategy: env_parse("SCORING_STRATEGY", ScoringStrategy::default())?,
            tone_strategy: env_parse("TONE_STRATEGY", ToneStrategy::default())?,
            sample_window: env_parse("ENGAGEMENT_WINDOW", 3)?,
            retrieval_k: env_parse("RETRIEVAL_K", 3)?,
            collaborator_timeout_secs: env_parse("COLLABORATOR_TIMEOUT_SECS", 8)?,
            rubric_weights: RubricWeights {
                relevance: env_parse("RUBRIC_WEIGHT_RELEVANCE", default_weights.relevance)?,
                accuracy: env_parse("RUBRIC_WEIGHT_ACCURACY", default_weights.accuracy)?,
                completeness: env_parse("RUBRIC_WEIGHT_COMPLETENESS", default_weights.completeness)?,
                clarity: env_parse("RUBRIC_WEIGHT_CLARITY", default_weights.clarity)?,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses an optional env var, falling back to `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for '{key}': {e}")),
        Err(_) => Ok(default),
    }
}
