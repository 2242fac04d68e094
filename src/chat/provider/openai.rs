//! OpenAI-compatible provider (Chat Completions API)
//!
//! Works against any OpenAI-compatible endpoint via a configurable base URL.
//! Streams are decoded with the core SSE decoder.

use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::mpsc;

use crate::core::{SseDecoder, SseItem};

use super::{
    ChatRequest, ChatResponse, FinishReason, Provider, StreamEvent, ToolCall,
    ToolContinueRequest, ToolDefinition, Usage,
};

/// Chat Completions provider for OpenAI-compatible APIs
pub struct OpenAiProvider {
    client: HttpClient,
    api_key: String,
    endpoint: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: &str) -> Self {
        Self {
            client: HttpClient::new(),
            api_key,
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
        }
    }

    /// Build message list from request
    fn build_messages(request: &ChatRequest) -> Vec<WireMessage> {
        let mut messages = Vec::new();

        messages.push(WireMessage {
            role: "system".into(),
            content: Some(request.system.clone()),
            tool_calls: None,
            tool_call_id: None,
        });

        for msg in &request.messages {
            messages.push(WireMessage {
                role: msg.role.as_str().into(),
                content: Some(msg.content.clone()),
                tool_calls: None,
                tool_call_id: None,
            });
        }

        messages
    }

    /// Build messages for tool continuation
    fn build_tool_messages(request: &ToolContinueRequest) -> Vec<WireMessage> {
        let mut messages = Vec::new();

        messages.push(WireMessage {
            role: "system".into(),
            content: Some(request.system.clone()),
            tool_calls: None,
            tool_call_id: None,
        });

        for msg in &request.messages {
            messages.push(WireMessage {
                role: msg.role.as_str().into(),
                content: Some(msg.content.clone()),
                tool_calls: None,
                tool_call_id: None,
            });
        }

        // Assistant message carrying tool_calls must precede the tool results;
        // the API rejects tool messages without it.
        if !request.tool_results.is_empty() {
            let tool_calls: Vec<WireToolCall> = request
                .tool_results
                .iter()
                .map(|r| WireToolCall {
                    id: r.call_id.clone(),
                    call_type: "function".into(),
                    function: WireToolCallFunction {
                        name: r.name.clone(),
                        arguments: "{}".into(), // args already executed, structure only
                    },
                })
                .collect();

            messages.push(WireMessage {
                role: "assistant".into(),
                content: None,
                tool_calls: Some(tool_calls),
                tool_call_id: None,
            });
        }

        for result in &request.tool_results {
            messages.push(WireMessage {
                role: "tool".into(),
                content: Some(result.output.clone()),
                tool_calls: None,
                tool_call_id: Some(result.call_id.clone()),
            });
        }

        messages
    }

    /// Convert our tool definitions to the OpenAI function-calling format
    fn convert_tools(tools: &[ToolDefinition]) -> Vec<WireTool> {
        tools
            .iter()
            .map(|t| WireTool {
                tool_type: "function".into(),
                function: WireFunction {
                    name: t.name.clone(),
                    description: Some(t.description.clone()),
                    parameters: t.parameters.clone(),
                },
            })
            .collect()
    }

    async fn post(&self, body: &ChatCompletionRequest) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("(failed to read body: {})", e));
            anyhow::bail!("chat completions API error {}: {}", status, text);
        }

        Ok(response)
    }

    /// Process SSE stream and send events to channel
    ///
    /// Shared logic for create_stream and continue_with_tools_stream.
    /// Tracks multiple parallel tool calls by index to handle interleaved
    /// streaming of several tool calls in one response.
    async fn process_sse_stream(response: reqwest::Response, tx: mpsc::Sender<StreamEvent>) {
        struct InFlightCall {
            id: String,
            name: String,
            started: bool,
        }

        let mut stream = response.bytes_stream();
        let mut decoder = SseDecoder::new();
        let mut tool_calls: HashMap<usize, InFlightCall> = HashMap::new();

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                    break;
                }
            };

            for item in decoder.feed(&chunk) {
                let payload = match item {
                    SseItem::Data(payload) => payload,
                    SseItem::Done => continue,
                };

                // Skip frames that are not chat-completion chunks.
                let chunk_data: StreamChunk = match serde_json::from_str(&payload) {
                    Ok(c) => c,
                    Err(_) => continue,
                };

                for choice in chunk_data.choices {
                    let delta = choice.delta;

                    if let Some(content) = delta.content {
                        if !content.is_empty() {
                            let _ = tx.send(StreamEvent::TextDelta(content)).await;
                        }
                    }

                    if let Some(reasoning) = delta.reasoning_content {
                        if !reasoning.is_empty() {
                            let _ = tx.send(StreamEvent::ReasoningDelta(reasoning)).await;
                        }
                    }

                    if let Some(delta_tool_calls) = delta.tool_calls {
                        for tc in delta_tool_calls {
                            let idx = tc.index;

                            let call = tool_calls.entry(idx).or_insert_with(|| InFlightCall {
                                id: String::new(),
                                name: String::new(),
                                started: false,
                            });

                            if let Some(ref id) = tc.id {
                                call.id = id.clone();
                            }

                            if let Some(ref func) = tc.function {
                                if let Some(ref name) = func.name {
                                    call.name = name.clone();
                                }
                            }

                            // Emit FunctionCallStart once we have both id and name
                            if !call.started && !call.id.is_empty() && !call.name.is_empty() {
                                call.started = true;
                                let _ = tx
                                    .send(StreamEvent::FunctionCallStart {
                                        call_id: call.id.clone(),
                                        name: call.name.clone(),
                                    })
                                    .await;
                            }

                            if let Some(ref func) = tc.function {
                                if let Some(ref args) = func.arguments {
                                    if !args.is_empty() && call.started {
                                        let _ = tx
                                            .send(StreamEvent::FunctionCallDelta {
                                                call_id: call.id.clone(),
                                                arguments_delta: args.clone(),
                                            })
                                            .await;
                                    }
                                }
                            }
                        }
                    }

                    // Emit FunctionCallEnd for all pending calls on finish
                    if choice.finish_reason.is_some() {
                        for (_, call) in tool_calls.drain() {
                            if call.started {
                                let _ = tx
                                    .send(StreamEvent::FunctionCallEnd { call_id: call.id })
                                    .await;
                            }
                        }
                    }
                }

                if let Some(usage) = chunk_data.usage {
                    let _ = tx
                        .send(StreamEvent::Usage(Usage {
                            input_tokens: usage.prompt_tokens,
                            output_tokens: usage.completion_tokens,
                        }))
                        .await;
                }
            }
        }

        let _ = tx.send(StreamEvent::Done).await;
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn create_stream(&self, request: ChatRequest) -> Result<mpsc::Receiver<StreamEvent>> {
        let messages = Self::build_messages(&request);
        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(Self::convert_tools(&request.tools))
        };

        let body = ChatCompletionRequest {
            model: request.model.clone(),
            messages,
            tools,
            stream: true,
            max_tokens: request.max_tokens,
        };

        let response = self.post(&body).await?;

        let (tx, rx) = mpsc::channel(100);
        tokio::spawn(Self::process_sse_stream(response, tx));

        Ok(rx)
    }

    async fn create(&self, request: ChatRequest) -> Result<ChatResponse> {
        let messages = Self::build_messages(&request);
        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(Self::convert_tools(&request.tools))
        };

        let body = ChatCompletionRequest {
            model: request.model.clone(),
            messages,
            tools,
            stream: false,
            max_tokens: request.max_tokens,
        };

        let response = self.post(&body).await?;
        let result: ChatCompletionResponse = response.json().await?;

        let choice = result
            .choices
            .first()
            .ok_or_else(|| anyhow::anyhow!("No choices in response"))?;

        let text = choice.message.content.clone().unwrap_or_default();

        let tool_calls = choice
            .message
            .tool_calls
            .as_ref()
            .map(|tcs| {
                tcs.iter()
                    .map(|tc| ToolCall {
                        call_id: tc.id.clone(),
                        name: tc.function.name.clone(),
                        arguments: tc.function.arguments.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let finish_reason = match choice.finish_reason.as_deref() {
            Some("tool_calls") => FinishReason::ToolCalls,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Stop,
        };

        let usage = result.usage.map(|u| Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        Ok(ChatResponse {
            id: result.id,
            text,
            tool_calls,
            usage,
            finish_reason,
        })
    }

    async fn continue_with_tools_stream(
        &self,
        request: ToolContinueRequest,
    ) -> Result<mpsc::Receiver<StreamEvent>> {
        let messages = Self::build_tool_messages(&request);
        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(Self::convert_tools(&request.tools))
        };

        let body = ChatCompletionRequest {
            model: request.model.clone(),
            messages,
            tools,
            stream: true,
            max_tokens: None,
        };

        let response = self.post(&body).await?;

        let (tx, rx) = mpsc::channel(100);
        tokio::spawn(Self::process_sse_stream(response, tx));

        Ok(rx)
    }
}

// ============================================================================
// Wire Types (OpenAI-compatible Chat Completions format)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    tool_type: String,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    id: String,
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    call_type: String,
    function: WireToolCallFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireToolCallFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

// Streaming types
#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    content: Option<String>,
    reasoning_content: Option<String>,
    tool_calls: Option<Vec<StreamToolCall>>,
}

#[derive(Debug, Deserialize)]
struct StreamToolCall {
    #[serde(default)]
    index: usize,
    id: Option<String>,
    function: Option<StreamFunction>,
}

#[derive(Debug, Deserialize)]
struct StreamFunction {
    name: Option<String>,
    arguments: Option<String>,
}
