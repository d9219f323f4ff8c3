use crate::models::{ChatReply, ConversationTurn, MoodAssessment, MoodInsights, MoodLabel};

/// Canned, mood-sensitive chat replies for when the remote gateway is
/// unavailable. Total and stateless: always succeeds.
#[derive(Clone, Default)]
pub struct ConversationResponder;

impl ConversationResponder {
    pub fn new() -> Self {
        Self
    }

    /// Produces a templated reply branched on the current mood label
    /// (neutral when no assessment is available).
    ///
    /// History is accepted for interface symmetry with the remote path but
    /// the canned reply does not use it. Known limitation of the fallback.
    pub fn respond(
        &self,
        _user_message: &str,
        _history: &[ConversationTurn],
        mood: Option<&MoodAssessment>,
    ) -> ChatReply {
        let label = mood.map(|m| m.mood).unwrap_or(MoodLabel::Neutral);

        let mut content = String::from("I'm here to help you with your studies! ");
        let suggestions: &[&str] = match label {
            MoodLabel::Tired | MoodLabel::Stressed => {
                content.push_str(
                    "I notice you might be feeling a bit overwhelmed. Let's take this step by step.",
                );
                &[
                    "Take a 5-minute break",
                    "Start with easier subjects",
                    "Set smaller, achievable goals",
                ]
            }
            MoodLabel::Happy | MoodLabel::Focused => {
                content.push_str(
                    "Great energy! You're in a perfect state for productive studying.",
                );
                &[
                    "Tackle challenging topics first",
                    "Plan longer study sessions",
                    "Set ambitious but realistic goals",
                ]
            }
            _ => {
                content.push_str("How can I help you optimize your study plan today?");
                &[
                    "Review your current schedule",
                    "Set study priorities",
                    "Plan your next session",
                ]
            }
        };

        ChatReply {
            content,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            study_recommendations: vec![],
            mood_insights: MoodInsights {
                mood_impact: format!("Your {} mood can influence study effectiveness.", label),
                encouragement: "Remember, every study session brings you closer to your goals!"
                    .to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoodContext;

    fn assessment_with(mood: MoodLabel) -> MoodAssessment {
        MoodAssessment {
            mood,
            confidence: 0.6,
            recommended_hours: 3.0,
            explanation: String::new(),
            study_tips: vec![],
            mood_context: MoodContext {
                emotional_tone: mood.to_string(),
                energy_level: "moderate".to_string(),
                stress_indicators: vec![],
            },
        }
    }

    #[test]
    fn test_stressed_branch_leads_with_short_break() {
        let responder = ConversationResponder::new();

        let reply = responder.respond("help", &[], Some(&assessment_with(MoodLabel::Stressed)));

        assert_eq!(reply.suggestions[0], "Take a 5-minute break");
        assert!(reply.content.contains("step by step"));
    }

    #[test]
    fn test_tired_and_stressed_share_the_empathetic_branch() {
        let responder = ConversationResponder::new();

        let tired = responder.respond("hi", &[], Some(&assessment_with(MoodLabel::Tired)));
        let stressed = responder.respond("hi", &[], Some(&assessment_with(MoodLabel::Stressed)));

        assert_eq!(tired.suggestions, stressed.suggestions);
    }

    #[test]
    fn test_focused_branch_is_energized() {
        let responder = ConversationResponder::new();

        let reply = responder.respond("ready", &[], Some(&assessment_with(MoodLabel::Focused)));

        assert_eq!(reply.suggestions[0], "Tackle challenging topics first");
        assert!(reply.content.contains("Great energy!"));
    }

    #[test]
    fn test_missing_mood_uses_neutral_branch() {
        let responder = ConversationResponder::new();

        let reply = responder.respond("hello", &[], None);

        assert_eq!(reply.suggestions[0], "Review your current schedule");
        assert!(reply
            .mood_insights
            .mood_impact
            .contains("Your neutral mood"));
    }

    #[test]
    fn test_other_labels_fall_through_to_neutral_branch() {
        let responder = ConversationResponder::new();

        for mood in [MoodLabel::Bored, MoodLabel::Relaxed, MoodLabel::Sad] {
            let reply = responder.respond("hi", &[], Some(&assessment_with(mood)));
            assert_eq!(reply.suggestions[0], "Review your current schedule");
        }
    }

    #[test]
    fn test_history_does_not_change_the_reply() {
        use crate::models::TurnRole;

        let responder = ConversationResponder::new();
        let history = vec![
            ConversationTurn {
                role: TurnRole::User,
                content: "I failed my last exam".to_string(),
            },
            ConversationTurn {
                role: TurnRole::Assistant,
                content: "Let's make a plan.".to_string(),
            },
        ];

        let with_history = responder.respond("what now", &history, None);
        let without_history = responder.respond("what now", &[], None);

        assert_eq!(with_history, without_history);
    }
}
