#![allow(dead_code)]

//! Categorical labels shared across the interview pipeline.
//!
//! The perception collaborator sends `emotion` and `gaze_direction` as plain
//! strings; both are validated against these fixed enumerations at the
//! boundary before any score is derived. The string forms below are part of
//! the wire contract — do not rename variants without versioning the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Emotion label from the perception collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Neutral,
    Sad,
    Angry,
    Surprised,
    Disgusted,
    Fearful,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Neutral => "neutral",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprised => "surprised",
            Emotion::Disgusted => "disgusted",
            Emotion::Fearful => "fearful",
        }
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Emotion::Happy),
            "neutral" => Ok(Emotion::Neutral),
            "sad" => Ok(Emotion::Sad),
            "angry" => Ok(Emotion::Angry),
            "surprised" => Ok(Emotion::Surprised),
            "disgusted" => Ok(Emotion::Disgusted),
            "fearful" => Ok(Emotion::Fearful),
            other => Err(format!("unknown emotion label '{other}'")),
        }
    }
}

/// Gaze direction label from the perception collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gaze {
    Center,
    Left,
    Right,
    Up,
    Down,
    Away,
}

impl Gaze {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gaze::Center => "center",
            Gaze::Left => "left",
            Gaze::Right => "right",
            Gaze::Up => "up",
            Gaze::Down => "down",
            Gaze::Away => "away",
        }
    }
}

impl FromStr for Gaze {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(Gaze::Center),
            "left" => Ok(Gaze::Left),
            "right" => Ok(Gaze::Right),
            "up" => Ok(Gaze::Up),
            "down" => Ok(Gaze::Down),
            "away" => Ok(Gaze::Away),
            other => Err(format!("unknown gaze label '{other}'")),
        }
    }
}

/// Categorical summary of recent candidate affect. Never persisted —
/// recomputed on demand from the engagement window and handed to the
/// question generator as a phrasing directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Confident,
    Hesitant,
    Nervous,
    #[default]
    Neutral,
    Curious,
    Frustrated,
    Anxious,
    Disengaged,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Confident => "confident",
            Tone::Hesitant => "hesitant",
            Tone::Nervous => "nervous",
            Tone::Neutral => "neutral",
            Tone::Curious => "curious",
            Tone::Frustrated => "frustrated",
            Tone::Anxious => "anxious",
            Tone::Disengaged => "disengaged",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hallucination verdict attached to every scored answer.
///
/// `Unknown` is reserved for the degraded path when the model-assisted judge
/// fails; the heuristic scorer never emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Valid,
    Speculative,
    Hallucination,
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Valid => "Valid",
            Verdict::Speculative => "Speculative",
            Verdict::Hallucination => "Hallucination",
            Verdict::Unknown => "Unknown",
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Valid" => Ok(Verdict::Valid),
            "Speculative" => Ok(Verdict::Speculative),
            "Hallucination" => Ok(Verdict::Hallucination),
            "Unknown" => Ok(Verdict::Unknown),
            other => Err(format!("unknown verdict '{other}'")),
        }
    }
}

/// Candidate intent for the current utterance, relative to the question on
/// the table. Anything the classifier cannot place lands on `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Clarify,
    Teach,
    #[default]
    Other,
}
