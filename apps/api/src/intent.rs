//! Intent Classifier — places a candidate utterance relative to the current
//! question: a normal answer, a request to simplify, or a request to be
//! taught the answer.
//!
//! The collaborator is held to a strict single-word response contract; any
//! response outside the three labels coerces to `other`. Transport failures
//! surface as `Err` and the orchestrator fails open to `other`.

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::llm_client::LlmClient;
use crate::models::labels::Intent;

const INTENT_SYSTEM: &str = "Classify user intent.";

const INTENT_PROMPT_TEMPLATE: &str = r#"You are a strict intent classifier for interview candidates.

Given the interview question and the candidate's response, classify their intent as:

- "clarify" → asking to rephrase or simplify the question
- "teach" → asking the AI to explain the answer
- "other" → normal answer or unrelated

Respond with a single word only: clarify, teach, or other.

Question: {question}
User Input: {utterance}"#;

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, question: &str, utterance: &str) -> Result<Intent>;
}

/// Coerces a raw classifier response to an intent. Trimmed, case-insensitive
/// exact match; anything else is `Other` — an unrecognized label must never
/// propagate upward.
pub fn coerce_intent(raw: &str) -> Intent {
    match raw.trim().to_lowercase().as_str() {
        "clarify" => Intent::Clarify,
        "teach" => Intent::Teach,
        _ => Intent::Other,
    }
}

/// LLM-backed classifier.
pub struct LlmIntentClassifier {
    llm: LlmClient,
}

impl LlmIntentClassifier {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, question: &str, utterance: &str) -> Result<Intent> {
        let prompt = INTENT_PROMPT_TEMPLATE
            .replace("{question}", question)
            .replace("{utterance}", utterance);
        let response = self.llm.prompt(INTENT_SYSTEM, &prompt).await?;
        let text = response
            .text()
            .ok_or_else(|| anyhow!("intent classifier returned empty content"))?;
        Ok(coerce_intent(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_labels_parse() {
        assert_eq!(coerce_intent("clarify"), Intent::Clarify);
        assert_eq!(coerce_intent("teach"), Intent::Teach);
        assert_eq!(coerce_intent("other"), Intent::Other);
    }

    #[test]
    fn test_labels_are_trimmed_and_case_folded() {
        assert_eq!(coerce_intent("  Clarify \n"), Intent::Clarify);
        assert_eq!(coerce_intent("TEACH"), Intent::Teach);
    }

    #[test]
    fn test_anything_else_coerces_to_other() {
        assert_eq!(coerce_intent("I don't know"), Intent::Other);
        assert_eq!(coerce_intent("clarification please"), Intent::Other);
        assert_eq!(coerce_intent(""), Intent::Other);
    }
}
