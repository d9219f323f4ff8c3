use serde::{Deserialize, Serialize};

/// Who produced a turn in the conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One turn of an ongoing chat. History is consumed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodInsights {
    pub mood_impact: String,
    pub encouragement: String,
}

/// Reply returned to the chat caller, from either path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub content: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub study_recommendations: Vec<String>,
    pub mood_insights: MoodInsights,
}

/// Wire format the chat prompt asks the model to return. The model's schema
/// uses `response` for the reply text and may omit the optional sections.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteChatReply {
    pub response: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub study_recommendations: Vec<String>,
    #[serde(default)]
    pub mood_insights: Option<MoodInsights>,
}

impl From<RemoteChatReply> for ChatReply {
    fn from(remote: RemoteChatReply) -> Self {
        ChatReply {
            content: remote.response,
            suggestions: remote.suggestions,
            study_recommendations: remote.study_recommendations,
            mood_insights: remote.mood_insights.unwrap_or_default(),
        }
    }
}
