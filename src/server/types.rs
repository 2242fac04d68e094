//! Wire types for the HTTP API

use serde::{Deserialize, Serialize};

/// Events streamed to the client over SSE during a chat turn.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// Word-chunked assistant text
    Delta { content: String },
    /// Reasoning trace content
    Reasoning { content: String },
    ToolCallStart {
        call_id: String,
        name: String,
        summary: String,
    },
    ToolCallResult {
        call_id: String,
        name: String,
        output: String,
    },
    Usage {
        input_tokens: u32,
        output_tokens: u32,
    },
    Error { message: String },
    /// Terminal event; the assistant message has been persisted (best effort)
    Done { message_id: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestBody {
    pub id: String,
    pub messages: Vec<IncomingMessage>,
    #[serde(default)]
    pub selected_chat_model: Option<String>,
    #[serde(default)]
    pub chat_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteChatQuery {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    pub chat_id: String,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteQuery {
    pub chat_id: String,
    #[serde(rename = "type", default)]
    pub chat_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePatchBody {
    pub chat_id: String,
    pub message_id: String,
    #[serde(rename = "type")]
    pub vote_type: String,
    #[serde(default)]
    pub is_travel_concierge_test: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub chat_id: String,
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteView {
    pub chat_id: String,
    pub message_id: String,
    pub is_upvoted: bool,
}
