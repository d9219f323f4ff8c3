//! Prompt templates sent to the remote completion gateway.
//!
//! Each prompt pins the exact JSON schema the model must return; anything
//! that fails to parse against that schema is treated as gateway failure and
//! the local fallback takes over.

use serde_json::Value;

use crate::models::{ConversationTurn, MoodAssessment, TurnRole};

const MOOD_LABELS: &str =
    "happy, excited, tired, stressed, bored, anxious, focused, relaxed, neutral, sad, or angry";

/// Prompt for mood analysis from a written description.
pub fn text_mood_prompt(description: &str) -> String {
    format!(
        r#"As an AI study advisor, analyze the student's mood description to recommend appropriate study hours.

Student's mood description: "{description}"

Please analyze the emotional content and context to determine:
1. Primary mood ({MOOD_LABELS})
2. Confidence level (0.0 to 1.0) in your mood assessment
3. Recommended study hours (0.5 to 8.0 hours) based on the detected mood
4. Brief explanation of why this duration is recommended
5. 3-5 personalized study tips based on the mood

Return ONLY a JSON response in this exact format:
{{
  "mood": "<detected_mood>",
  "confidence": <confidence_score>,
  "recommendedHours": <study_hours>,
  "explanation": "<explanation>",
  "studyTips": ["<tip1>", "<tip2>", "<tip3>"],
  "moodContext": {{
    "emotionalTone": "<tone_description>",
    "energyLevel": "<energy_level>",
    "stressIndicators": ["<indicator1>", "<indicator2>"]
  }}
}}"#
    )
}

/// Prompt for mood analysis from a voice transcription.
pub fn voice_mood_prompt(transcription: &str) -> String {
    format!(
        r#"As an AI study advisor, analyze the student's voice transcription to detect their emotional state and recommend appropriate study hours.

Student's voice transcription: "{transcription}"

Please analyze the emotional content, tone, and context to determine:
1. Primary mood ({MOOD_LABELS})
2. Confidence level (0.0 to 1.0) in your mood assessment
3. Recommended study hours (0.5 to 8.0 hours) based on the detected mood
4. Brief explanation of why this duration is recommended
5. 3-5 personalized study tips based on the mood

Return ONLY a JSON response in this exact format:
{{
  "mood": "<detected_mood>",
  "confidence": <confidence_score>,
  "recommendedHours": <study_hours>,
  "explanation": "<explanation>",
  "studyTips": ["<tip1>", "<tip2>", "<tip3>"],
  "moodContext": {{
    "emotionalTone": "<tone_description>",
    "energyLevel": "<energy_level>",
    "stressIndicators": ["<indicator1>", "<indicator2>"]
  }}
}}"#
    )
}

/// Context-aware prompt for the study chat. Interpolates the last five
/// history turns, the current mood assessment and an opaque study context.
pub fn chat_prompt(
    user_message: &str,
    history: &[ConversationTurn],
    mood: Option<&MoodAssessment>,
    study_context: Option<&Value>,
) -> String {
    let recent_messages = history
        .iter()
        .rev()
        .take(5)
        .rev()
        .map(|turn| {
            let role = match turn.role {
                TurnRole::User => "user",
                TurnRole::Assistant => "assistant",
            };
            format!("{}: {}", role, turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mood_line = match mood {
        Some(m) => format!("{} ({} confidence)", m.mood, m.confidence),
        None => "unknown (0 confidence)".to_string(),
    };
    let mood_context_line = mood
        .filter(|m| !m.explanation.is_empty())
        .map(|m| format!("MOOD CONTEXT: {}\n", m.explanation))
        .unwrap_or_default();

    let study_context_line = study_context
        .map(|c| c.to_string())
        .unwrap_or_else(|| "{}".to_string());

    format!(
        r#"You are an intelligent study assistant. Consider the following context to provide personalized, helpful responses.

STUDENT'S CURRENT MOOD: {mood_line}
{mood_context_line}STUDY CONTEXT: {study_context_line}

RECENT CONVERSATION:
{recent_messages}

STUDENT'S MESSAGE: {user_message}

INSTRUCTIONS:
- Provide helpful, encouraging study advice
- Consider the student's current mood when giving recommendations
- If they seem stressed/tired, suggest shorter sessions and breaks
- If they seem excited/focused, encourage longer, challenging sessions
- Be conversational but professional
- Include specific, actionable study tips
- Keep responses concise but comprehensive

Return ONLY a JSON response in this format:
{{
  "response": "<your helpful response>",
  "suggestions": ["<suggestion1>", "<suggestion2>"],
  "studyRecommendations": ["<recommendation1>", "<recommendation2>"],
  "moodInsights": {{
    "moodImpact": "<how mood affects study>",
    "encouragement": "<motivational message>"
  }}
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MoodContext, MoodLabel};

    #[test]
    fn test_text_mood_prompt_embeds_description_and_schema() {
        let prompt = text_mood_prompt("feeling pretty good");

        assert!(prompt.contains("feeling pretty good"));
        assert!(prompt.contains("\"recommendedHours\""));
        assert!(prompt.contains("0.5 to 8.0"));
    }

    #[test]
    fn test_chat_prompt_keeps_only_last_five_turns() {
        let history: Vec<ConversationTurn> = (0..8)
            .map(|i| ConversationTurn {
                role: TurnRole::User,
                content: format!("message-{}", i),
            })
            .collect();

        let prompt = chat_prompt("next", &history, None, None);

        assert!(!prompt.contains("message-2"));
        assert!(prompt.contains("message-3"));
        assert!(prompt.contains("message-7"));
    }

    #[test]
    fn test_chat_prompt_interpolates_mood() {
        let mood = MoodAssessment {
            mood: MoodLabel::Focused,
            confidence: 0.7,
            recommended_hours: 4.0,
            explanation: "High energy detected.".to_string(),
            study_tips: vec![],
            mood_context: MoodContext {
                emotional_tone: "focused".to_string(),
                energy_level: "moderate".to_string(),
                stress_indicators: vec![],
            },
        };

        let prompt = chat_prompt("let's go", &[], Some(&mood), None);

        assert!(prompt.contains("STUDENT'S CURRENT MOOD: focused (0.7 confidence)"));
        assert!(prompt.contains("MOOD CONTEXT: High energy detected."));
    }

    #[test]
    fn test_chat_prompt_without_mood_reports_unknown() {
        let prompt = chat_prompt("hello", &[], None, None);
        assert!(prompt.contains("STUDENT'S CURRENT MOOD: unknown (0 confidence)"));
    }
}
