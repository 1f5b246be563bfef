//! Session Orchestrator — the state machine that sequences interview turns.
//!
//! Flow per adaptive turn: classify intent → [rubric scorer ∥ engagement
//! tone] → generate next question → append audit turn → optional coaching
//! hint → respond.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod question_gen;

pub use orchestrator::{AskRequest, AskResponse, Interviewer, InterviewerConfig, SessionPhase};
