//! Model-assisted scoring backend — delegates the rubric judgment to Claude,
//! grounded in retrieved resume passages.
//!
//! Every failure mode of the call (transport error, malformed JSON, missing
//! key, out-of-range value, unknown verdict) resolves to the same fixed
//! degraded report. The orchestrator never sees an error from this backend.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::llm_client::LlmClient;
use crate::models::labels::Verdict;
use crate::scoring::prompts::{JUDGE_PROMPT_TEMPLATE, JUDGE_SYSTEM};
use crate::scoring::{adaptive_score, AnswerScorer, RubricReport, RubricWeights, Subscores};

/// Raw judge output. Serde enforces that all four numeric keys are present
/// and parse as floats; range and verdict validation happen in
/// `validate_judged`.
#[derive(Debug, Deserialize)]
pub struct JudgedRubric {
    pub relevance: f64,
    pub accuracy: f64,
    pub completeness: f64,
    pub clarity: f64,
    pub hallucination: String,
}

/// Checks the judged subscores are in range and the verdict is one of the
/// three values the judge is allowed to emit, then reduces to a report.
pub fn validate_judged(judged: JudgedRubric, weights: &RubricWeights) -> Result<RubricReport> {
    let subscores = Subscores {
        relevance: judged.relevance,
        accuracy: judged.accuracy,
        completeness: judged.completeness,
        clarity: judged.clarity,
    };
    for (name, value) in [
        ("relevance", subscores.relevance),
        ("accuracy", subscores.accuracy),
        ("completeness", subscores.completeness),
        ("clarity", subscores.clarity),
    ] {
        if !(0.0..=1.0).contains(&value) || value.is_nan() {
            bail!("judge returned out-of-range {name}: {value}");
        }
    }

    let hallucination = match judged.hallucination.as_str() {
        "Valid" => Verdict::Valid,
        "Speculative" => Verdict::Speculative,
        "Hallucination" => Verdict::Hallucination,
        other => bail!("judge returned unknown verdict '{other}'"),
    };

    Ok(RubricReport {
        score: adaptive_score(&subscores, weights),
        subscores: Some(subscores),
        hallucination,
    })
}

/// Rubric scorer backed by the grounded-judgment LLM call.
pub struct LlmScorer {
    llm: LlmClient,
    weights: RubricWeights,
}

impl LlmScorer {
    pub fn new(llm: LlmClient, weights: RubricWeights) -> Self {
        Self { llm, weights }
    }

    async fn judge(&self, question: &str, answer: &str, grounding: &str) -> Result<RubricReport> {
        let context = if grounding.trim().is_empty() {
            "[None provided]"
        } else {
            grounding
        };
        let prompt = JUDGE_PROMPT_TEMPLATE
            .replace("{question}", question)
            .replace("{answer}", answer)
            .replace("{context}", context);

        let judged: JudgedRubric = self.llm.prompt_json(JUDGE_SYSTEM, &prompt).await?;
        validate_judged(judged, &self.weights)
    }
}

#[async_trait]
impl AnswerScorer for LlmScorer {
    async fn score(&self, question: &str, answer: &str, grounding: &str) -> RubricReport {
        match self.judge(question, answer, grounding).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Rubric judge degraded to fixed result: {e}");
                RubricReport::degraded()
            }
        }
    }
}
