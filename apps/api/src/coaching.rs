#![allow(dead_code)]

//! Coaching Advisor — surfaces one hint when recent engagement drops.
//!
//! Advisory only: the orchestrator appends the hint to the outgoing question
//! text and nothing downstream depends on it, so every failure upstream of
//! this module degrades to "no hint".

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The fixed hint set. Selection is uniform at random.
pub const COACHING_HINTS: &[&str] = &[
    "Try to give a structured response using the STAR method.",
    "Focus on measurable outcomes when describing your work.",
    "Speak with confidence—even if you're unsure, walk through your thought process.",
    "Highlight teamwork and collaboration if the question allows it.",
    "If unsure, describe how you would approach solving the problem.",
];

const LOW_ENGAGEMENT_THRESHOLD: f64 = 0.6;

/// Hint selection with an injected RNG so tests can pin the seed.
pub struct CoachingAdvisor {
    rng: Mutex<StdRng>,
}

impl CoachingAdvisor {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Returns a hint when the mean of the recent engagement scores falls
    /// below the threshold; `None` on an empty window or healthy engagement.
    pub fn maybe_hint(&self, recent_scores: &[f64]) -> Option<&'static str> {
        if recent_scores.is_empty() {
            return None;
        }
        let mean = recent_scores.iter().sum::<f64>() / recent_scores.len() as f64;
        if mean >= LOW_ENGAGEMENT_THRESHOLD {
            return None;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Some(COACHING_HINTS[rng.gen_range(0..COACHING_HINTS.len())])
    }
}

impl Default for CoachingAdvisor {
    fn default() -> Self {
        Self::new()
    }
}
