//! Rubric Scorer — pluggable, trait-based scoring of one (question, answer,
//! grounding) triple into four normalized subscores, a weighted scalar, and
//! a hallucination verdict.
//!
//! Default: `HeuristicScorer` (pure-Rust, fast, deterministic, no external
//! call). Alternate: `LlmScorer` (grounded judgment via Claude), swapped at
//! startup via `SCORING_STRATEGY=model`.
//!
//! `AppState` holds the active backend as `Arc<dyn AnswerScorer>`. Scoring
//! is infallible at this boundary: the model-assisted backend absorbs every
//! transport and schema failure into a fixed degraded report, so a scorer
//! problem can never abort an interview turn.

pub mod heuristic;
pub mod model;
pub mod prompts;

pub use heuristic::HeuristicScorer;
pub use model::LlmScorer;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::labels::Verdict;

/// The four rubric dimensions, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subscores {
    pub relevance: f64,
    pub accuracy: f64,
    pub completeness: f64,
    pub clarity: f64,
}

/// Per-dimension weights for the scalar reduction. Overridable via
/// `RUBRIC_WEIGHT_*` env vars; the defaults are the production policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubricWeights {
    pub relevance: f64,
    pub accuracy: f64,
    pub completeness: f64,
    pub clarity: f64,
}

impl Default for RubricWeights {
    fn default() -> Self {
        Self {
            relevance: 2.0,
            accuracy: 3.0,
            completeness: 2.0,
            clarity: 1.0,
        }
    }
}

/// Weighted mean of the subscores, rounded to 3 decimal places.
/// The rounding is part of the contract — persisted scores and API responses
/// must match it exactly.
pub fn adaptive_score(subscores: &Subscores, weights: &RubricWeights) -> f64 {
    let total = subscores.relevance * weights.relevance
        + subscores.accuracy * weights.accuracy
        + subscores.completeness * weights.completeness
        + subscores.clarity * weights.clarity;
    let weight_sum = weights.relevance + weights.accuracy + weights.completeness + weights.clarity;
    round3(total / weight_sum)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Full scorer output for one answer.
#[derive(Debug, Clone, Serialize)]
pub struct RubricReport {
    pub subscores: Option<Subscores>,
    pub score: f64,
    pub hallucination: Verdict,
}

impl RubricReport {
    /// The fixed degraded result used when the model-assisted judge fails.
    pub fn degraded() -> Self {
        Self {
            subscores: None,
            score: 0.5,
            hallucination: Verdict::Unknown,
        }
    }
}

/// The scorer trait. Implement this to swap backends without touching the
/// orchestrator or handler code.
#[async_trait]
pub trait AnswerScorer: Send + Sync {
    async fn score(&self, question: &str, answer: &str, grounding: &str) -> RubricReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adaptive_score_hand_computed() {
        let subs = Subscores {
            relevance: 1.0,
            accuracy: 0.9,
            completeness: 0.4,
            clarity: 0.8,
        };
        // (2.0 + 2.7 + 0.8 + 0.8) / 8 = 0.7875 → 0.788
        let score = adaptive_score(&subs, &RubricWeights::default());
        assert_eq!(score, 0.788);
    }

    #[test]
    fn test_adaptive_score_invariant_under_uniform_weight_scaling() {
        let subs = Subscores {
            relevance: 0.8,
            accuracy: 0.6,
            completeness: 0.4,
            clarity: 0.2,
        };
        let base = RubricWeights::default();
        let scaled = RubricWeights {
            relevance: base.relevance * 7.0,
            accuracy: base.accuracy * 7.0,
            completeness: base.completeness * 7.0,
            clarity: base.clarity * 7.0,
        };
        assert_eq!(adaptive_score(&subs, &base), adaptive_score(&subs, &scaled));
    }

    #[test]
    fn test_adaptive_score_all_ones_is_one() {
        let subs = Subscores {
            relevance: 1.0,
            accuracy: 1.0,
            completeness: 1.0,
            clarity: 1.0,
        };
        assert_eq!(adaptive_score(&subs, &RubricWeights::default()), 1.0);
    }

    #[test]
    fn test_adaptive_score_rounds_to_three_decimals() {
        let subs = Subscores {
            relevance: 1.0 / 3.0,
            accuracy: 1.0 / 3.0,
            completeness: 1.0 / 3.0,
            clarity: 1.0 / 3.0,
        };
        assert_eq!(adaptive_score(&subs, &RubricWeights::default()), 0.333);
    }

    #[test]
    fn test_degraded_report_shape() {
        let report = RubricReport::degraded();
        assert!(report.subscores.is_none());
        assert_eq!(report.score, 0.5);
        assert_eq!(report.hallucination, Verdict::Unknown);
    }
}
