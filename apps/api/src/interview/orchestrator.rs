//! The turn state machine.
//!
//! Three phases, derived from how many real answers the candidate has given:
//! two fixed opening prompts, then adaptive turns that combine intent
//! classification, grounding retrieval, tone, rubric scoring, and coaching.
//!
//! Failure policy (see `errors.rs` for the taxonomy): retrieval, tone,
//! intent, and coaching degrade to defaults and only `warn!`; question
//! generation and the audit append are fatal to the turn.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

use crate::coaching::CoachingAdvisor;
use crate::engagement::{self, EngagementPolicy, ToneStrategy, DEFAULT_WINDOW};
use crate::errors::AppError;
use crate::intent::IntentClassifier;
use crate::interview::prompts::{
    simplified_question, INTRO_PROMPT, MOVE_ON_PROMPT, ROLE_PROMPT, TEACH_REFUSAL,
};
use crate::interview::question_gen::QuestionGenerator;
use crate::llm_client::ChatMessage;
use crate::models::interview::{EngagementSampleRow, NewSample, NewTurn, SessionRow};
use crate::models::labels::{Emotion, Gaze, Intent, Tone, Verdict};
use crate::retrieval::PassageRetriever;
use crate::scoring::{AnswerScorer, Subscores};
use crate::store::InterviewStore;

pub const EMPTY_SENTINEL: &str = "[EMPTY]";
pub const SKIP_SENTINEL: &str = "[SKIP]";

/// True for the reserved tokens standing in for "no speech detected" and
/// "explicit skip request".
pub fn is_sentinel(utterance: &str) -> bool {
    matches!(utterance.trim(), EMPTY_SENTINEL | SKIP_SENTINEL)
}

fn is_real_answer(content: &str) -> bool {
    !content.trim().is_empty() && !is_sentinel(content)
}

/// Interview phase, a pure function of the real-answer count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingRole,
    AwaitingIntro,
    Adaptive,
}

impl SessionPhase {
    pub fn from_real_answers(count: usize) -> Self {
        match count {
            0 => SessionPhase::AwaitingRole,
            1 => SessionPhase::AwaitingIntro,
            _ => SessionPhase::Adaptive,
        }
    }
}

/// One incoming utterance. `history` holds the prior conversation only; the
/// current utterance travels in `user_input` and is never duplicated into
/// `history` by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub session_id: Uuid,
    pub candidate_id: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub user_input: String,
}

/// The orchestrator's reply for one turn. Scoring fields are `None` on the
/// opening prompts and on every short-circuited branch.
#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub question: String,
    pub score: Option<f64>,
    pub subscores: Option<Subscores>,
    pub hallucination: Option<Verdict>,
}

impl AskResponse {
    fn prompt_only(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            score: None,
            subscores: None,
            hallucination: None,
        }
    }
}

/// Tuning knobs for the orchestrator, all env-driven in production.
#[derive(Debug, Clone)]
pub struct InterviewerConfig {
    pub tone_strategy: ToneStrategy,
    pub engagement_policy: EngagementPolicy,
    pub sample_window: usize,
    pub retrieval_k: usize,
    pub degradable_timeout: Duration,
}

impl Default for InterviewerConfig {
    fn default() -> Self {
        Self {
            tone_strategy: ToneStrategy::default(),
            engagement_policy: EngagementPolicy::default(),
            sample_window: DEFAULT_WINDOW,
            retrieval_k: 3,
            degradable_timeout: Duration::from_secs(8),
        }
    }
}

/// The Session Orchestrator. Every collaborator is injected as a trait
/// object so tests can substitute fakes without touching process-wide state.
pub struct Interviewer {
    store: Arc<dyn InterviewStore>,
    retriever: Arc<dyn PassageRetriever>,
    scorer: Arc<dyn AnswerScorer>,
    intents: Arc<dyn IntentClassifier>,
    questions: Arc<dyn QuestionGenerator>,
    advisor: CoachingAdvisor,
    config: InterviewerConfig,
}

impl Interviewer {
    pub fn new(
        store: Arc<dyn InterviewStore>,
        retriever: Arc<dyn PassageRetriever>,
        scorer: Arc<dyn AnswerScorer>,
        intents: Arc<dyn IntentClassifier>,
        questions: Arc<dyn QuestionGenerator>,
        advisor: CoachingAdvisor,
        config: InterviewerConfig,
    ) -> Self {
        Self {
            store,
            retriever,
            scorer,
            intents,
            questions,
            advisor,
            config,
        }
    }

    pub async fn start_session(
        &self,
        candidate_name: Option<String>,
        job_role: Option<String>,
    ) -> Result<SessionRow, AppError> {
        let session = self
            .store
            .create_session(candidate_name, job_role)
            .await
            .map_err(AppError::Internal)?;
        info!("Started interview session {}", session.id);
        Ok(session)
    }

    /// Validates and records one perception tick, deriving its engagement
    /// score at the boundary.
    pub async fn log_sample(
        &self,
        session_id: Uuid,
        emotion: Emotion,
        face_present: bool,
        gaze: Gaze,
    ) -> Result<EngagementSampleRow, AppError> {
        let engagement_score =
            engagement::score_sample(emotion, face_present, gaze, &self.config.engagement_policy);
        self.store
            .append_sample(NewSample {
                session_id,
                emotion,
                face_present,
                gaze,
                engagement_score,
            })
            .await
            .map_err(AppError::Internal)
    }

    /// Handles one candidate utterance and produces the next prompt.
    pub async fn handle_utterance(&self, req: AskRequest) -> Result<AskResponse, AppError> {
        if self
            .store
            .get_session(req.session_id)
            .await
            .map_err(AppError::Internal)?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Session {} not found",
                req.session_id
            )));
        }

        let real_answers = req
            .history
            .iter()
            .filter(|m| m.role == "user" && is_real_answer(&m.content))
            .count();
        let previous_question = req
            .history
            .iter()
            .rev()
            .find(|m| m.role == "assistant")
            .map(|m| m.content.clone());

        match SessionPhase::from_real_answers(real_answers) {
            SessionPhase::AwaitingRole => self.seed_turn(&req, previous_question, ROLE_PROMPT).await,
            SessionPhase::AwaitingIntro => {
                self.seed_turn(&req, previous_question, INTRO_PROMPT).await
            }
            SessionPhase::Adaptive => self.adaptive_turn(req, previous_question).await,
        }
    }

    /// Opening phases: reply with the fixed prompt, never score. A real
    /// utterance still lands in the audit log as an unscored turn.
    async fn seed_turn(
        &self,
        req: &AskRequest,
        previous_question: Option<String>,
        prompt: &'static str,
    ) -> Result<AskResponse, AppError> {
        if is_real_answer(&req.user_input) {
            self.store
                .append_turn(NewTurn::unscored(
                    req.session_id,
                    previous_question,
                    req.user_input.trim().to_string(),
                ))
                .await
                .map_err(AppError::Internal)?;
        }
        Ok(AskResponse::prompt_only(prompt))
    }

    async fn adaptive_turn(
        &self,
        req: AskRequest,
        previous_question: Option<String>,
    ) -> Result<AskResponse, AppError> {
        let utterance = req.user_input.trim();

        // Sentinels never reach the scorer: near-empty text would earn a
        // "Hallucination" verdict the candidate never deserved.
        if is_sentinel(utterance) {
            return Ok(AskResponse::prompt_only(MOVE_ON_PROMPT));
        }

        let question_text = previous_question.clone().unwrap_or_default();

        let intent = match timeout(
            self.config.degradable_timeout,
            self.intents.classify(&question_text, utterance),
        )
        .await
        {
            Ok(Ok(intent)) => intent,
            Ok(Err(e)) => {
                warn!("Intent classification failed, proceeding as normal answer: {e}");
                Intent::Other
            }
            Err(_) => {
                warn!("Intent classification timed out, proceeding as normal answer");
                Intent::Other
            }
        };

        match intent {
            Intent::Teach => return Ok(AskResponse::prompt_only(TEACH_REFUSAL)),
            Intent::Clarify => {
                return Ok(AskResponse::prompt_only(simplified_question(&question_text)))
            }
            Intent::Other => {}
        }

        let grounding = self
            .fetch_grounding(&req.candidate_id, &question_text, utterance)
            .await;
        let tone = self.session_tone(req.session_id).await;

        // Fatal from here on: no fallback question exists, and a lost audit
        // entry would silently corrupt the interview record.
        let mut messages = req.history.clone();
        messages.push(ChatMessage::user(utterance));
        let next_question = self
            .questions
            .next_question(&messages, &extra_instructions(tone, &grounding))
            .await?;

        let report = self.scorer.score(&question_text, utterance, &grounding).await;

        let subscores_json = report
            .subscores
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to serialize subscores: {e}"))
            })?;
        let turn = self
            .store
            .append_turn(NewTurn {
                session_id: req.session_id,
                question: previous_question,
                answer: utterance.to_string(),
                subscores: subscores_json,
                score: Some(report.score),
                hallucination: Some(report.hallucination),
            })
            .await
            .map_err(AppError::Internal)?;
        info!(
            "Scored turn {} of session {}: score={} verdict={}",
            turn.position,
            req.session_id,
            report.score,
            report.hallucination.as_str()
        );

        let question = match self.advisor.maybe_hint(&self.recent_scores(req.session_id).await) {
            Some(hint) => format!("{next_question}\n\nCoaching tip: {hint}"),
            None => next_question,
        };

        Ok(AskResponse {
            question,
            score: Some(report.score),
            subscores: report.subscores,
            hallucination: Some(report.hallucination),
        })
    }

    /// Best-effort grounding passages for the current exchange; empty on any
    /// failure or timeout.
    async fn fetch_grounding(&self, candidate_id: &str, question: &str, answer: &str) -> String {
        let query = format!("{question} {answer}");
        match timeout(
            self.config.degradable_timeout,
            self.retriever
                .relevant_passages(candidate_id, query.trim(), self.config.retrieval_k),
        )
        .await
        {
            Ok(Ok(passages)) => passages.join("\n\n"),
            Ok(Err(e)) => {
                warn!("Resume grounding skipped: {e}");
                String::new()
            }
            Err(_) => {
                warn!("Resume grounding timed out");
                String::new()
            }
        }
    }

    /// Best-effort tone for the session under the configured strategy;
    /// neutral on any storage failure.
    async fn session_tone(&self, session_id: Uuid) -> Tone {
        match self.config.tone_strategy {
            ToneStrategy::EngagementAverage => {
                match self
                    .store
                    .recent_samples(session_id, self.config.sample_window)
                    .await
                {
                    Ok(samples) => {
                        let scores: Vec<f64> =
                            samples.iter().map(|s| s.engagement_score).collect();
                        engagement::summarize_tone(&scores, self.config.sample_window)
                    }
                    Err(e) => {
                        warn!("Tone computation failed, defaulting to neutral: {e}");
                        Tone::Neutral
                    }
                }
            }
            ToneStrategy::ModalEmotion => {
                match self
                    .store
                    .recent_samples(session_id, self.config.sample_window)
                    .await
                {
                    Ok(samples) => {
                        let labels: Vec<String> =
                            samples.iter().map(|s| s.emotion.clone()).collect();
                        engagement::summarize_modal_emotion(&labels, self.config.sample_window)
                    }
                    Err(e) => {
                        warn!("Tone computation failed, defaulting to neutral: {e}");
                        Tone::Neutral
                    }
                }
            }
            ToneStrategy::Lexical => match self.store.recent_turns(session_id).await {
                Ok(turns) => {
                    let answers: Vec<String> = turns.iter().map(|t| t.answer.clone()).collect();
                    engagement::summarize_lexical(&answers)
                }
                Err(e) => {
                    warn!("Tone computation failed, defaulting to neutral: {e}");
                    Tone::Neutral
                }
            },
        }
    }

    async fn recent_scores(&self, session_id: Uuid) -> Vec<f64> {
        match self
            .store
            .recent_samples(session_id, self.config.sample_window)
            .await
        {
            Ok(samples) => samples.iter().map(|s| s.engagement_score).collect(),
            Err(e) => {
                warn!("Coaching window unavailable, skipping hint: {e}");
                Vec::new()
            }
        }
    }
}

fn extra_instructions(tone: Tone, grounding: &str) -> String {
    let mut extra =
        format!("The candidate currently sounds {tone}. Adapt your phrasing accordingly.");
    if !grounding.is_empty() {
        extra.push_str("\n\nRelevant resume context:\n");
        extra.push_str(grounding);
    }
    extra
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use chrono::Utc;

    use crate::models::interview::TurnRow;
    use crate::scoring::{HeuristicScorer, RubricReport, RubricWeights};

    // ── Fakes ───────────────────────────────────────────────────────────

    #[derive(Default)]
    struct MemoryStore {
        sessions: Mutex<Vec<SessionRow>>,
        turns: Mutex<Vec<TurnRow>>,
        samples: Mutex<Vec<EngagementSampleRow>>,
        fail_turn_appends: bool,
    }

    impl MemoryStore {
        fn with_session(session_id: Uuid) -> Self {
            let store = Self::default();
            store.sessions.lock().unwrap().push(SessionRow {
                id: session_id,
                candidate_name: None,
                job_role: None,
                created_at: Utc::now(),
            });
            store
        }

        fn push_sample(&self, session_id: Uuid, engagement_score: f64) {
            let mut samples = self.samples.lock().unwrap();
            samples.push(EngagementSampleRow {
                id: Uuid::new_v4(),
                session_id,
                emotion: "neutral".to_string(),
                face_present: true,
                gaze_direction: "center".to_string(),
                engagement_score,
                created_at: Utc::now(),
            });
        }

        fn turn_count(&self) -> usize {
            self.turns.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl InterviewStore for MemoryStore {
        async fn create_session(
            &self,
            candidate_name: Option<String>,
            job_role: Option<String>,
        ) -> Result<SessionRow> {
            let row = SessionRow {
                id: Uuid::new_v4(),
                candidate_name,
                job_role,
                created_at: Utc::now(),
            };
            self.sessions.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn get_session(&self, session_id: Uuid) -> Result<Option<SessionRow>> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == session_id)
                .cloned())
        }

        async fn list_sessions(&self) -> Result<Vec<SessionRow>> {
            Ok(self.sessions.lock().unwrap().clone())
        }

        async fn append_turn(&self, turn: NewTurn) -> Result<TurnRow> {
            if self.fail_turn_appends {
                return Err(anyhow!("store offline"));
            }
            let mut turns = self.turns.lock().unwrap();
            let position = turns
                .iter()
                .filter(|t| t.session_id == turn.session_id)
                .count() as i32
                + 1;
            let row = TurnRow {
                id: Uuid::new_v4(),
                session_id: turn.session_id,
                position,
                question: turn.question,
                answer: turn.answer,
                subscores: turn.subscores,
                score: turn.score,
                hallucination: turn.hallucination.map(|v| v.as_str().to_string()),
                created_at: Utc::now(),
            };
            turns.push(row.clone());
            Ok(row)
        }

        async fn append_sample(&self, sample: NewSample) -> Result<EngagementSampleRow> {
            let row = EngagementSampleRow {
                id: Uuid::new_v4(),
                session_id: sample.session_id,
                emotion: sample.emotion.as_str().to_string(),
                face_present: sample.face_present,
                gaze_direction: sample.gaze.as_str().to_string(),
                engagement_score: sample.engagement_score,
                created_at: Utc::now(),
            };
            self.samples.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn recent_samples(
            &self,
            session_id: Uuid,
            limit: usize,
        ) -> Result<Vec<EngagementSampleRow>> {
            let samples = self.samples.lock().unwrap();
            Ok(samples
                .iter()
                .filter(|s| s.session_id == session_id)
                .rev()
                .take(limit)
                .cloned()
                .collect())
        }

        async fn recent_turns(&self, session_id: Uuid) -> Result<Vec<TurnRow>> {
            let turns = self.turns.lock().unwrap();
            Ok(turns
                .iter()
                .filter(|t| t.session_id == session_id)
                .cloned()
                .collect())
        }

        async fn turns_for_session(
            &self,
            session_id: Uuid,
            include_unscored: bool,
        ) -> Result<Vec<TurnRow>> {
            let turns = self.recent_turns(session_id).await?;
            Ok(turns
                .into_iter()
                .filter(|t| include_unscored || t.score.is_some())
                .collect())
        }

        async fn samples_for_session(
            &self,
            session_id: Uuid,
        ) -> Result<Vec<EngagementSampleRow>> {
            let samples = self.samples.lock().unwrap();
            Ok(samples
                .iter()
                .filter(|s| s.session_id == session_id)
                .cloned()
                .collect())
        }
    }

    struct FixedRetriever(Vec<String>);

    #[async_trait]
    impl PassageRetriever for FixedRetriever {
        async fn relevant_passages(
            &self,
            _candidate_id: &str,
            _query: &str,
            _k: usize,
        ) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FixedIntent(Intent);

    #[async_trait]
    impl IntentClassifier for FixedIntent {
        async fn classify(&self, _question: &str, _utterance: &str) -> Result<Intent> {
            Ok(self.0)
        }
    }

    struct FailingIntent;

    #[async_trait]
    impl IntentClassifier for FailingIntent {
        async fn classify(&self, _question: &str, _utterance: &str) -> Result<Intent> {
            Err(anyhow!("classifier offline"))
        }
    }

    struct CountingGenerator {
        reply: String,
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingGenerator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                reply: String::new(),
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl QuestionGenerator for CountingGenerator {
        async fn next_question(
            &self,
            _history: &[ChatMessage],
            _extra_instructions: &str,
        ) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Llm("generator offline".to_string()));
            }
            Ok(self.reply.clone())
        }
    }

    /// Wraps the heuristic scorer to count how often the judgment path runs.
    struct CountingScorer {
        inner: HeuristicScorer,
        calls: AtomicUsize,
    }

    impl CountingScorer {
        fn new() -> Self {
            Self {
                inner: HeuristicScorer::new(RubricWeights::default()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AnswerScorer for CountingScorer {
        async fn score(&self, question: &str, answer: &str, grounding: &str) -> RubricReport {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.score(question, answer, grounding).await
        }
    }

    // ── Harness ─────────────────────────────────────────────────────────

    struct Harness {
        store: Arc<MemoryStore>,
        generator: Arc<CountingGenerator>,
        scorer: Arc<CountingScorer>,
        interviewer: Interviewer,
        session_id: Uuid,
    }

    fn harness(intent: Arc<dyn IntentClassifier>, generator: CountingGenerator) -> Harness {
        let session_id = Uuid::new_v4();
        let store = Arc::new(MemoryStore::with_session(session_id));
        let generator = Arc::new(generator);
        let scorer = Arc::new(CountingScorer::new());
        let interviewer = Interviewer::new(
            store.clone(),
            Arc::new(FixedRetriever(vec![])),
            scorer.clone(),
            intent,
            generator.clone(),
            CoachingAdvisor::with_seed(7),
            InterviewerConfig::default(),
        );
        Harness {
            store,
            generator,
            scorer,
            interviewer,
            session_id,
        }
    }

    fn ask(session_id: Uuid, history: Vec<ChatMessage>, user_input: &str) -> AskRequest {
        AskRequest {
            session_id,
            candidate_id: session_id.to_string(),
            history,
            user_input: user_input.to_string(),
        }
    }

    fn adaptive_history() -> Vec<ChatMessage> {
        vec![
            ChatMessage::assistant(ROLE_PROMPT),
            ChatMessage::user("Backend engineer"),
            ChatMessage::assistant(INTRO_PROMPT),
            ChatMessage::user("Six years building payment systems in Rust and Go."),
            ChatMessage::assistant("What was the hardest outage you handled?"),
        ]
    }

    // ── Phase machine ───────────────────────────────────────────────────

    #[test]
    fn test_phase_from_real_answer_count() {
        assert_eq!(SessionPhase::from_real_answers(0), SessionPhase::AwaitingRole);
        assert_eq!(SessionPhase::from_real_answers(1), SessionPhase::AwaitingIntro);
        assert_eq!(SessionPhase::from_real_answers(2), SessionPhase::Adaptive);
        assert_eq!(SessionPhase::from_real_answers(9), SessionPhase::Adaptive);
    }

    #[test]
    fn test_sentinels_are_not_real_answers() {
        assert!(!is_real_answer("[EMPTY]"));
        assert!(!is_real_answer("[SKIP]"));
        assert!(!is_real_answer("   "));
        assert!(is_real_answer("I led the migration."));
    }

    #[tokio::test]
    async fn test_empty_history_gets_role_prompt_unscored() {
        let h = harness(Arc::new(FixedIntent(Intent::Other)), CountingGenerator::new("q?"));
        let resp = h
            .interviewer
            .handle_utterance(ask(h.session_id, vec![], ""))
            .await
            .unwrap();
        assert_eq!(resp.question, ROLE_PROMPT);
        assert!(resp.score.is_none());
        assert_eq!(h.store.turn_count(), 0);
    }

    #[tokio::test]
    async fn test_one_real_answer_gets_intro_prompt() {
        let h = harness(Arc::new(FixedIntent(Intent::Other)), CountingGenerator::new("q?"));
        let history = vec![
            ChatMessage::assistant(ROLE_PROMPT),
            ChatMessage::user("Backend engineer"),
        ];
        let resp = h
            .interviewer
            .handle_utterance(ask(h.session_id, history, "Backend engineer"))
            .await
            .unwrap();
        assert_eq!(resp.question, INTRO_PROMPT);
        assert!(resp.score.is_none());
        // The role answer lands in the audit log, unscored.
        let turns = h.store.recent_turns(h.session_id).await.unwrap();
        assert_eq!(turns.len(), 1);
        assert!(turns[0].score.is_none());
    }

    #[tokio::test]
    async fn test_unknown_session_is_rejected() {
        let h = harness(Arc::new(FixedIntent(Intent::Other)), CountingGenerator::new("q?"));
        let err = h
            .interviewer
            .handle_utterance(ask(Uuid::new_v4(), vec![], ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    // ── Sentinel handling ───────────────────────────────────────────────

    #[tokio::test]
    async fn test_sentinel_in_adaptive_skips_scoring_and_persistence() {
        for sentinel in [EMPTY_SENTINEL, SKIP_SENTINEL] {
            let h = harness(Arc::new(FixedIntent(Intent::Other)), CountingGenerator::new("q?"));
            let resp = h
                .interviewer
                .handle_utterance(ask(h.session_id, adaptive_history(), sentinel))
                .await
                .unwrap();
            assert_eq!(resp.question, MOVE_ON_PROMPT);
            assert!(resp.score.is_none());
            assert_eq!(h.store.turn_count(), 0);
            assert_eq!(h.scorer.calls.load(Ordering::SeqCst), 0);
            assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
        }
    }

    // ── Intent branches ─────────────────────────────────────────────────

    #[tokio::test]
    async fn test_teach_intent_refuses_without_scoring() {
        let h = harness(Arc::new(FixedIntent(Intent::Teach)), CountingGenerator::new("q?"));
        let resp = h
            .interviewer
            .handle_utterance(ask(h.session_id, adaptive_history(), "Just tell me the answer"))
            .await
            .unwrap();
        assert_eq!(resp.question, TEACH_REFUSAL);
        assert!(resp.score.is_none());
        assert_eq!(h.store.turn_count(), 0);
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_clarify_intent_echoes_simpler_question() {
        let h = harness(Arc::new(FixedIntent(Intent::Clarify)), CountingGenerator::new("q?"));
        let resp = h
            .interviewer
            .handle_utterance(ask(h.session_id, adaptive_history(), "Could you rephrase that?"))
            .await
            .unwrap();
        assert!(resp.question.contains("What was the hardest outage you handled?"));
        assert!(resp.score.is_none());
        assert_eq!(h.store.turn_count(), 0);
    }

    #[tokio::test]
    async fn test_classifier_failure_fails_open_to_normal_turn() {
        let h = harness(Arc::new(FailingIntent), CountingGenerator::new("Next question?"));
        let resp = h
            .interviewer
            .handle_utterance(ask(
                h.session_id,
                adaptive_history(),
                "We recovered by replaying the write-ahead log onto a fresh replica.",
            ))
            .await
            .unwrap();
        assert!(resp.score.is_some());
        assert_eq!(h.store.turn_count(), 1);
    }

    // ── The scored path ─────────────────────────────────────────────────

    #[tokio::test]
    async fn test_substantive_answer_produces_scored_turn() {
        let h = harness(
            Arc::new(FixedIntent(Intent::Other)),
            CountingGenerator::new("How did you verify the fix?"),
        );
        let answer =
            "We recovered the outage by replaying the write-ahead log because the replica had diverged.";
        let resp = h
            .interviewer
            .handle_utterance(ask(h.session_id, adaptive_history(), answer))
            .await
            .unwrap();

        assert_eq!(resp.question, "How did you verify the fix?");
        let score = resp.score.unwrap();
        assert!((0.0..=1.0).contains(&score));
        // Contract: persisted and returned scores carry 3-decimal rounding.
        assert_eq!(score, (score * 1000.0).round() / 1000.0);
        let subs = resp.subscores.expect("all four subscores populated");
        for v in [subs.relevance, subs.accuracy, subs.completeness, subs.clarity] {
            assert!((0.0..=1.0).contains(&v));
        }
        assert_eq!(resp.hallucination, Some(Verdict::Valid));

        let turns = h.store.recent_turns(h.session_id).await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].answer, answer);
        assert_eq!(turns[0].score, Some(score));
        assert!(turns[0].subscores.is_some());
        assert_eq!(
            turns[0].question.as_deref(),
            Some("What was the hardest outage you handled?")
        );
    }

    #[tokio::test]
    async fn test_generation_failure_is_fatal_and_leaves_log_untouched() {
        let h = harness(Arc::new(FixedIntent(Intent::Other)), CountingGenerator::failing());
        let err = h
            .interviewer
            .handle_utterance(ask(
                h.session_id,
                adaptive_history(),
                "A long and perfectly reasonable answer about the incident.",
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
        assert_eq!(h.store.turn_count(), 0);
    }

    #[tokio::test]
    async fn test_persistence_failure_surfaces_an_error() {
        let session_id = Uuid::new_v4();
        let mut store = MemoryStore::with_session(session_id);
        store.fail_turn_appends = true;
        let interviewer = Interviewer::new(
            Arc::new(store),
            Arc::new(FixedRetriever(vec![])),
            Arc::new(CountingScorer::new()),
            Arc::new(FixedIntent(Intent::Other)),
            Arc::new(CountingGenerator::new("q?")),
            CoachingAdvisor::with_seed(7),
            InterviewerConfig::default(),
        );
        let err = interviewer
            .handle_utterance(ask(
                session_id,
                adaptive_history(),
                "A long and perfectly reasonable answer about the incident.",
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    // ── Coaching integration ────────────────────────────────────────────

    #[tokio::test]
    async fn test_low_engagement_appends_coaching_tip() {
        let h = harness(Arc::new(FixedIntent(Intent::Other)), CountingGenerator::new("q?"));
        for score in [0.2, 0.3, 0.1] {
            h.store.push_sample(h.session_id, score);
        }
        let resp = h
            .interviewer
            .handle_utterance(ask(
                h.session_id,
                adaptive_history(),
                "We recovered by replaying the write-ahead log onto a fresh replica.",
            ))
            .await
            .unwrap();
        assert!(resp.question.contains("Coaching tip:"));
    }

    #[tokio::test]
    async fn test_healthy_engagement_leaves_question_untouched() {
        let h = harness(Arc::new(FixedIntent(Intent::Other)), CountingGenerator::new("q?"));
        for score in [0.9, 0.95, 1.0] {
            h.store.push_sample(h.session_id, score);
        }
        let resp = h
            .interviewer
            .handle_utterance(ask(
                h.session_id,
                adaptive_history(),
                "We recovered by replaying the write-ahead log onto a fresh replica.",
            ))
            .await
            .unwrap();
        assert_eq!(resp.question, "q?");
    }

    // ── Perception boundary ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_log_sample_derives_score_at_insert() {
        let h = harness(Arc::new(FixedIntent(Intent::Other)), CountingGenerator::new("q?"));
        let row = h
            .interviewer
            .log_sample(h.session_id, Emotion::Angry, false, Gaze::Away)
            .await
            .unwrap();
        assert_eq!(row.engagement_score, 0.0);
        let row = h
            .interviewer
            .log_sample(h.session_id, Emotion::Happy, true, Gaze::Center)
            .await
            .unwrap();
        assert_eq!(row.engagement_score, 1.0);
    }
}
