use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of emotional-state categories used to drive study recommendations.
///
/// Serialized lowercase on the wire, matching the JSON contract the mood
/// prompt asks the model to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Happy,
    Excited,
    Tired,
    Stressed,
    Bored,
    Anxious,
    Focused,
    Relaxed,
    Neutral,
    Sad,
    Angry,
}

impl MoodLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "happy",
            MoodLabel::Excited => "excited",
            MoodLabel::Tired => "tired",
            MoodLabel::Stressed => "stressed",
            MoodLabel::Bored => "bored",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Focused => "focused",
            MoodLabel::Relaxed => "relaxed",
            MoodLabel::Neutral => "neutral",
            MoodLabel::Sad => "sad",
            MoodLabel::Angry => "angry",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative context attached to a mood assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodContext {
    pub emotional_tone: String,
    pub energy_level: String,
    #[serde(default)]
    pub stress_indicators: Vec<String>,
}

/// Result of one mood analysis, from either the remote gateway or the local
/// fallback classifier. Immutable once produced; the caller owns persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodAssessment {
    pub mood: MoodLabel,
    pub confidence: f32,
    pub recommended_hours: f32,
    pub explanation: String,
    #[serde(default)]
    pub study_tips: Vec<String>,
    pub mood_context: MoodContext,
}

impl MoodAssessment {
    /// Range checks a remote result must pass before it may supersede the
    /// local fallback: confidence in [0, 1], hours in [0.5, 8.0], at most
    /// five study tips.
    pub fn is_within_bounds(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
            && (0.5..=8.0).contains(&self.recommended_hours)
            && self.study_tips.len() <= 5
    }
}
