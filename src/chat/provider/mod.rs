//! Provider abstraction for the chat model
//!
//! One unified trait covering:
//! - streaming chat completions with tool calling
//! - non-streaming completions (title generation, travel-plan assembly)
//! - continuation after tool execution

mod openai;
mod types;

pub use openai::OpenAiProvider;
pub use types::*;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Unified provider trait for LLM backends
#[async_trait]
pub trait Provider: Send + Sync {
    /// Create a streaming chat completion
    async fn create_stream(&self, request: ChatRequest) -> Result<mpsc::Receiver<StreamEvent>>;

    /// Create a non-streaming chat completion
    async fn create(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Continue a conversation with tool results (streaming)
    async fn continue_with_tools_stream(
        &self,
        request: ToolContinueRequest,
    ) -> Result<mpsc::Receiver<StreamEvent>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
