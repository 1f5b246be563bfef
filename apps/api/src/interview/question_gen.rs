//! Next-question generation — the generative collaborator boundary.
//!
//! Unlike the advisory collaborators, a generation failure is fatal to the
//! turn: there is no sensible fallback question to put in the candidate's
//! ear, so the error surfaces to the caller.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::interview::prompts::INTERVIEWER_SYSTEM;
use crate::llm_client::{ChatMessage, LlmClient};

#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Produces the next interview question from the conversation history.
    /// `extra_instructions` carries the tone directive and any grounding
    /// context, appended to the system prompt for this call only.
    async fn next_question(
        &self,
        history: &[ChatMessage],
        extra_instructions: &str,
    ) -> Result<String, AppError>;
}

/// LLM-backed generator over the shared client.
pub struct LlmQuestionGenerator {
    llm: LlmClient,
}

impl LlmQuestionGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn next_question(
        &self,
        history: &[ChatMessage],
        extra_instructions: &str,
    ) -> Result<String, AppError> {
        let system = if extra_instructions.is_empty() {
            INTERVIEWER_SYSTEM.to_string()
        } else {
            format!("{INTERVIEWER_SYSTEM}\n\n{extra_instructions}")
        };

        let response = self
            .llm
            .chat(&system, history)
            .await
            .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

        let text = response
            .text()
            .ok_or_else(|| AppError::Llm("Question generator returned empty content".to_string()))?;

        Ok(text.trim().to_string())
    }
}
