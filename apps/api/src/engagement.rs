//! Engagement Aggregator — turns perception ticks into bounded engagement
//! scores and summarizes a recent window of them into a categorical tone.
//!
//! Scoring is pure and deterministic: the same (emotion, face, gaze) triple
//! always yields the same score, so stored values can be recomputed from the
//! raw labels at any time.

use std::str::FromStr;

use crate::models::labels::{Emotion, Gaze, Tone};

/// Default number of recent samples considered by the tone summaries.
pub const DEFAULT_WINDOW: usize = 3;

/// Penalties and label sets applied by `score_sample`. The defaults are the
/// production policy; the sets are configurable so a deployment can e.g.
/// treat `fearful` as negative without a code change.
#[derive(Debug, Clone)]
pub struct EngagementPolicy {
    pub face_absent_penalty: f64,
    pub negative_emotion_penalty: f64,
    pub distracted_gaze_penalty: f64,
    pub negative_emotions: Vec<Emotion>,
    pub distracted_gaze: Vec<Gaze>,
}

impl Default for EngagementPolicy {
    fn default() -> Self {
        Self {
            face_absent_penalty: 0.5,
            negative_emotion_penalty: 0.3,
            distracted_gaze_penalty: 0.2,
            negative_emotions: vec![Emotion::Sad, Emotion::Angry, Emotion::Disgusted],
            distracted_gaze: vec![Gaze::Down, Gaze::Away],
        }
    }
}

/// Derives the engagement score for one perception tick.
/// Penalties are additive and the result is clamped to [0, 1].
pub fn score_sample(
    emotion: Emotion,
    face_present: bool,
    gaze: Gaze,
    policy: &EngagementPolicy,
) -> f64 {
    let mut score = 1.0_f64;
    if !face_present {
        score -= policy.face_absent_penalty;
    }
    if policy.negative_emotions.contains(&emotion) {
        score -= policy.negative_emotion_penalty;
    }
    if policy.distracted_gaze.contains(&gaze) {
        score -= policy.distracted_gaze_penalty;
    }
    score.clamp(0.0, 1.0)
}

/// Which windowed summary is authoritative for a session's tone.
/// Numeric engagement average is the default; the alternates exist for
/// deployments without perception ticks or with emotion-only feeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToneStrategy {
    #[default]
    EngagementAverage,
    ModalEmotion,
    Lexical,
}

impl FromStr for ToneStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "engagement" => Ok(ToneStrategy::EngagementAverage),
            "emotion" => Ok(ToneStrategy::ModalEmotion),
            "lexical" => Ok(ToneStrategy::Lexical),
            other => Err(format!("unknown tone strategy '{other}'")),
        }
    }
}

/// Numeric-average summary over the most recent `limit` engagement scores.
/// Empty window reads as neutral — missing signal is not a signal.
pub fn summarize_tone(scores: &[f64], limit: usize) -> Tone {
    let window = &scores[..scores.len().min(limit)];
    if window.is_empty() {
        return Tone::Neutral;
    }
    let avg = window.iter().sum::<f64>() / window.len() as f64;
    if avg > 0.85 {
        Tone::Confident
    } else if avg > 0.5 {
        Tone::Hesitant
    } else {
        Tone::Nervous
    }
}

/// Maps a single emotion label to the tone it signals.
pub fn emotion_tone(emotion: Emotion) -> Tone {
    match emotion {
        Emotion::Happy => Tone::Confident,
        Emotion::Fearful => Tone::Nervous,
        Emotion::Disgusted => Tone::Disengaged,
        Emotion::Surprised => Tone::Curious,
        Emotion::Angry => Tone::Frustrated,
        Emotion::Sad => Tone::Anxious,
        Emotion::Neutral => Tone::Neutral,
    }
}

/// Modal-emotion summary: the most frequent emotion in the window wins,
/// ties broken by first-seen order. Labels that fail validation are skipped
/// (stored rows were validated at insert, so this only guards drift).
pub fn summarize_modal_emotion(emotion_labels: &[String], limit: usize) -> Tone {
    let window = &emotion_labels[..emotion_labels.len().min(limit)];

    let mut counts: Vec<(Emotion, usize)> = Vec::new();
    for label in window {
        let Ok(emotion) = Emotion::from_str(label) else {
            continue;
        };
        match counts.iter_mut().find(|(e, _)| *e == emotion) {
            Some((_, n)) => *n += 1,
            None => counts.push((emotion, 1)),
        }
    }

    let mut best: Option<(Emotion, usize)> = None;
    for (emotion, n) in counts {
        // Strictly greater keeps the first-seen emotion on ties.
        if best.map(|(_, m)| n > m).unwrap_or(true) {
            best = Some((emotion, n));
        }
    }

    best.map(|(e, _)| emotion_tone(e)).unwrap_or(Tone::Neutral)
}

const NERVOUS_MARKERS: &[&str] = &["stress", "worried", "difficult", "confused"];
const CONFIDENT_MARKERS: &[&str] = &["excited", "confident", "happy", "sure"];

/// Resume-free lexical summary over recent turn answers. Used when no
/// perception feed exists for the session.
pub fn summarize_lexical(answers: &[String]) -> Tone {
    if answers.is_empty() {
        return Tone::Neutral;
    }
    let text = answers.join(" ").to_lowercase();
    if NERVOUS_MARKERS.iter().any(|m| text.contains(m)) {
        Tone::Nervous
    } else if CONFIDENT_MARKERS.iter().any(|m| text.contains(m)) {
        Tone::Confident
    } else {
        Tone::Neutral
    }
}
