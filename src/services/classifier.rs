use std::sync::Arc;

use crate::models::{MoodAssessment, MoodContext, MoodLabel};
use crate::services::keywords::{MoodKeywordTable, StudyHoursPolicy};

const NEUTRAL_CONFIDENCE: f32 = 0.5;
const CONFIDENCE_PER_MATCH: f32 = 0.1;
const MAX_CONFIDENCE: f32 = 0.8;

/// Deterministic keyword-based mood classifier, used whenever the remote
/// gateway is unavailable or returns unusable output.
///
/// Pure function over the input and the immutable keyword table: never fails,
/// always returns a well-formed assessment (neutral when nothing matches).
#[derive(Clone)]
pub struct TextMoodClassifier {
    table: Arc<MoodKeywordTable>,
}

impl TextMoodClassifier {
    pub fn new() -> Self {
        Self {
            table: MoodKeywordTable::shared(),
        }
    }

    pub fn with_table(table: Arc<MoodKeywordTable>) -> Self {
        Self { table }
    }

    /// Classifies a free-text mood description.
    pub fn classify(&self, description: &str) -> MoodAssessment {
        let (mood, matches) = self
            .table
            .best_match(description)
            .unwrap_or((MoodLabel::Neutral, 0));

        let confidence =
            (NEUTRAL_CONFIDENCE + CONFIDENCE_PER_MATCH * matches as f32).min(MAX_CONFIDENCE);

        MoodAssessment {
            mood,
            confidence,
            recommended_hours: StudyHoursPolicy::recommended_hours(mood),
            explanation: format!("Based on your description, you seem {}.", mood),
            study_tips: generic_study_tips(),
            mood_context: MoodContext {
                emotional_tone: mood.to_string(),
                energy_level: energy_level(mood).to_string(),
                stress_indicators: if mood == MoodLabel::Stressed {
                    vec!["text indicators".to_string()]
                } else {
                    vec![]
                },
            },
        }
    }

    /// Same classification over a voice transcription; only the wording of
    /// the explanation and stress indicators differs from the text path.
    pub fn classify_transcription(&self, transcription: &str) -> MoodAssessment {
        let mut assessment = self.classify(transcription);
        assessment.explanation = format!("Based on voice analysis, you seem {}.", assessment.mood);
        if assessment.mood == MoodLabel::Stressed {
            assessment.mood_context.stress_indicators = vec!["voice tension".to_string()];
        }
        assessment
    }
}

impl Default for TextMoodClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn energy_level(mood: MoodLabel) -> &'static str {
    if mood == MoodLabel::Tired {
        "low"
    } else {
        "moderate"
    }
}

// The fallback path keeps tips generic on purpose; per-mood tips come from
// the remote path only
fn generic_study_tips() -> Vec<String> {
    vec![
        "Take regular breaks to maintain focus".to_string(),
        "Set achievable study goals".to_string(),
        "Create a comfortable study environment".to_string(),
    ]
}
