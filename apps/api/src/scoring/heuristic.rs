#![allow(dead_code)]

//! Heuristic scoring backend — fast, local, no external call.
//!
//! The marker lists are policy, not heuristics to be tuned per deployment
//! casually: downstream score consumers depend on the exact thresholds.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::models::labels::Verdict;
use crate::scoring::{adaptive_score, AnswerScorer, RubricReport, RubricWeights, Subscores};

/// Marker words driving the heuristic subscores and the hallucination check.
#[derive(Debug, Clone)]
pub struct HeuristicPolicy {
    pub affirmative_markers: Vec<String>,
    pub explanatory_markers: Vec<String>,
    pub hedge_markers: Vec<String>,
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self {
            affirmative_markers: vec!["correct".to_string(), "is".to_string()],
            explanatory_markers: vec![
                "because".to_string(),
                "for example".to_string(),
                "i think".to_string(),
            ],
            hedge_markers: vec!["not sure".to_string(), "maybe".to_string()],
        }
    }
}

/// Pure-Rust rubric scorer. Grounding context is ignored — this backend has
/// no way to fact-check, which is why its hallucination verdict is purely
/// surface-level.
pub struct HeuristicScorer {
    weights: RubricWeights,
    policy: HeuristicPolicy,
}

impl HeuristicScorer {
    pub fn new(weights: RubricWeights) -> Self {
        Self {
            weights,
            policy: HeuristicPolicy::default(),
        }
    }

    pub fn with_policy(weights: RubricWeights, policy: HeuristicPolicy) -> Self {
        Self { weights, policy }
    }

    /// Computes the four rubric subscores for one answer.
    pub fn subscores(&self, question: &str, answer: &str) -> Subscores {
        let answer_lower = answer.to_lowercase();
        let question_lower = question.to_lowercase();

        let question_tokens: HashSet<&str> = question_lower.split_whitespace().collect();
        let overlaps = answer_lower
            .split_whitespace()
            .any(|token| question_tokens.contains(token));
        // Overlap only ever raises relevance; 0.6 is the floor.
        let relevance = if overlaps { 1.0 } else { 0.6 };

        let affirmative = self
            .policy
            .affirmative_markers
            .iter()
            .any(|m| answer_lower.contains(m));
        let accuracy = if affirmative { 0.9 } else { 0.6 };

        let word_count = answer.split_whitespace().count();
        let completeness = if word_count <= 5 {
            0.0
        } else {
            (word_count as f64 / 25.0).min(1.0)
        };

        let explanatory = self
            .policy
            .explanatory_markers
            .iter()
            .any(|m| answer_lower.contains(m));
        let terminal_punctuation = answer.contains(['.', '!', '?']);
        let clarity = if explanatory || terminal_punctuation {
            0.8
        } else {
            0.5
        };

        Subscores {
            relevance,
            accuracy,
            completeness,
            clarity,
        }
    }

    /// Surface-level hallucination check. Hedges are checked before the
    /// length floor so "maybe" reads as speculation, not fabrication.
    pub fn verdict(&self, answer: &str) -> Verdict {
        let answer_lower = answer.to_lowercase();
        if self.policy.hedge_markers.iter().any(|m| answer_lower.contains(m)) {
            Verdict::Speculative
        } else if answer.trim().len() < 5 {
            Verdict::Hallucination
        } else {
            Verdict::Valid
        }
    }
}

#[async_trait]
impl AnswerScorer for HeuristicScorer {
    async fn score(&self, question: &str, answer: &str, _grounding: &str) -> RubricReport {
        let subscores = self.subscores(question, answer);
        RubricReport {
            score: adaptive_score(&subscores, &self.weights),
            subscores: Some(subscores),
            hallucination: self.verdict(answer),
        }
    }
}
