//! Shared request/response types for LLM providers

use serde::{Deserialize, Serialize};

/// Role of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Tool => "tool",
        }
    }
}

/// A conversation message in provider-neutral form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Tool definition exposed to the model
///
/// `parameters` is a JSON Schema object; its field names and types are the
/// wire contract the model uses to invoke tools, so they must match the
/// executor exactly.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A completed tool call extracted from a model response
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub call_id: String,
    pub name: String,
    pub arguments: String,
}

/// Result of executing a tool, fed back into the model's context
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub call_id: String,
    pub name: String,
    pub output: String,
}

/// Token usage for a request
#[derive(Debug, Clone, Copy, Default)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    ToolCalls,
    Length,
    ContentFilter,
}

/// Request for a chat completion
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            messages: Vec::new(),
            tools: Vec::new(),
            max_tokens: None,
        }
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Request to continue a conversation after executing tool calls
#[derive(Debug, Clone)]
pub struct ToolContinueRequest {
    pub model: String,
    pub system: String,
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
    pub tool_results: Vec<ToolResult>,
}

/// Non-streaming chat completion response
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub id: String,
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
    pub usage: Option<Usage>,
    pub finish_reason: FinishReason,
}

/// Events emitted by a streaming chat completion
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// Incremental assistant text
    TextDelta(String),
    /// Incremental reasoning content (models that expose it)
    ReasoningDelta(String),
    /// A tool call started (id and name are known)
    FunctionCallStart { call_id: String, name: String },
    /// Incremental tool call arguments
    FunctionCallDelta {
        call_id: String,
        arguments_delta: String,
    },
    /// A tool call's arguments are complete
    FunctionCallEnd { call_id: String },
    /// Token usage (sent near the end of the stream)
    Usage(Usage),
    /// Stream failed
    Error(String),
    /// Stream complete
    Done,
}
