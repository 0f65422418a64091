//! Assistant chat types

use serde::{Deserialize, Serialize};

/// Body of `POST /api/assistant/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantChatRequest {
    pub question: String,
}

/// Answer produced by the refund assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantChatResponse {
    pub answer_markdown: String,
    #[serde(default)]
    pub citations: Vec<AssistantCitation>,
    #[serde(default)]
    pub actions: Vec<AssistantAction>,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantCitation {
    pub doc_id: String,
    pub quote: String,
}

/// Follow-up the UI may offer next to an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantAction {
    #[serde(rename = "type")]
    pub action_type: AssistantActionType,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssistantActionType {
    Refresh,
    ContactSupport,
    ShowTracking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}
