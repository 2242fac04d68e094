//! Chat turn processing
//!
//! The agentic loop that drives one conversation turn: stream the model
//! response, execute any tool calls it makes, feed results back, and repeat
//! for up to a bounded number of rounds before persisting the final answer.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::chat::provider::{
    ChatRequest as ProviderChatRequest, Message as ProviderMessage, MessageRole, Provider,
    StreamEvent, ToolContinueRequest, ToolResult,
};
use crate::chat::stream::WordChunker;
use crate::server::ChatEvent;
use crate::store::ChatStore;
use crate::tools::{get_tools, tool_summary, ToolExecutor};

/// System prompt for the travel concierge persona
pub const TRAVEL_CONCIERGE_PROMPT: &str = "\
You are an AI travel concierge specifically designed for medical professionals \
who have just booked a Continuing Medical Education (CME) course in Las Vegas.

## Core Information
- The user is a medical professional who has booked a CME course in Las Vegas.
- The course details (venue location, start date/time, end date/time) will be provided at the start of our conversation.
- Your task is to help them arrange flights, accommodations, and entertainment options that align with their course schedule.

## Conversation Flow
1. First, welcome the user and acknowledge their course details.
2. Ask about their departure city/airport preferences.
3. Inquire if they want to specify a budget (make this optional).
4. Ask about hotel preferences (star rating, amenities, distance from venue).
5. Find out their entertainment interests for free time between course sessions.
6. Ask about any special requirements or considerations.

## Key Tasks
- Find the cheapest flights from the user's departure city to Las Vegas (LAS) that arrive before the course start and depart after the course end.
- Recommend hotels based on proximity to the course venue.
- Suggest entertainment options that fit in the user's free time.
- If the user specifies a budget, keep the total cost of flights, hotel, and entertainment within this limit.
- Present a complete travel plan including flight details, hotel information, and entertainment recommendations.

## Important Notes
- Be conversational and friendly, but efficient.
- Remember that the user's primary purpose in Las Vegas is to attend the CME course, so all travel arrangements must accommodate this schedule.
- Present all costs in USD.
- Ask questions one at a time to keep the conversation focused.
- Make notes when you need more information to provide good recommendations.

Remember, you are assisting a busy medical professional, so value their time and provide concise, relevant information.";

/// One resolved chat turn, ready to stream.
///
/// Identity, validation, chat resolution, and user-message persistence have
/// already happened in the handler by the time this is constructed.
pub struct ChatTurn {
    pub chat_id: String,
    pub model: String,
    pub max_tokens: u32,
    pub max_tool_rounds: usize,
    /// Full conversation including the latest user message, oldest first.
    pub messages: Vec<ProviderMessage>,
}

/// Process a chat turn through the agentic loop.
///
/// Streams `ChatEvent`s into `tx`; the caller forwards them as SSE. Tool
/// failures surface as tool output data and never abort the turn. The
/// assistant message is persisted best-effort after the stream ends.
pub async fn process_chat(
    provider: Arc<dyn Provider>,
    executor: ToolExecutor,
    store: ChatStore,
    turn: ChatTurn,
    tx: mpsc::Sender<ChatEvent>,
) -> Result<()> {
    let tools = get_tools();

    let mut conversation = turn.messages.clone();
    let mut accumulated_text = String::new();
    let mut accumulated_reasoning = String::new();
    let mut chunker = WordChunker::new();
    let message_id = Uuid::new_v4().to_string();

    let initial_request = ProviderChatRequest::new(&turn.model, TRAVEL_CONCIERGE_PROMPT)
        .with_messages(conversation.clone())
        .with_tools(tools.clone())
        .with_max_tokens(turn.max_tokens);

    let mut rx = provider.create_stream(initial_request).await?;

    for round in 0..turn.max_tool_rounds {
        let mut pending_calls: HashMap<String, (String, String)> = HashMap::new();
        let mut round_tool_results: Vec<ToolResult> = Vec::new();
        let mut round_text = String::new();
        let mut stream_failed = false;

        while let Some(event) = rx.recv().await {
            match event {
                StreamEvent::TextDelta(delta) => {
                    accumulated_text.push_str(&delta);
                    round_text.push_str(&delta);
                    for chunk in chunker.feed(&delta) {
                        tx.send(ChatEvent::Delta { content: chunk }).await?;
                    }
                }
                StreamEvent::ReasoningDelta(delta) => {
                    accumulated_reasoning.push_str(&delta);
                    tx.send(ChatEvent::Reasoning { content: delta }).await?;
                }
                StreamEvent::FunctionCallStart { call_id, name } => {
                    pending_calls.insert(call_id, (name, String::new()));
                }
                StreamEvent::FunctionCallDelta {
                    call_id,
                    arguments_delta,
                } => {
                    if let Some((_, args)) = pending_calls.get_mut(&call_id) {
                        args.push_str(&arguments_delta);
                    }
                }
                StreamEvent::FunctionCallEnd { call_id } => {
                    if let Some((name, args)) = pending_calls.remove(&call_id) {
                        // Arguments are only complete here, so this is the
                        // first point a meaningful summary can be built.
                        let parsed_args: serde_json::Value =
                            serde_json::from_str(&args).unwrap_or_default();
                        tx.send(ChatEvent::ToolCallStart {
                            call_id: call_id.clone(),
                            name: name.clone(),
                            summary: tool_summary(&name, &parsed_args),
                        })
                        .await?;

                        tracing::debug!(tool = %name, round, "Executing tool call");
                        let output = executor.execute(&name, &args).await;

                        tx.send(ChatEvent::ToolCallResult {
                            call_id: call_id.clone(),
                            name: name.clone(),
                            output: output.clone(),
                        })
                        .await?;

                        round_tool_results.push(ToolResult {
                            call_id,
                            name,
                            output,
                        });
                    }
                }
                StreamEvent::Usage(usage) => {
                    tx.send(ChatEvent::Usage {
                        input_tokens: usage.input_tokens,
                        output_tokens: usage.output_tokens,
                    })
                    .await?;
                }
                StreamEvent::Error(message) => {
                    tx.send(ChatEvent::Error { message }).await?;
                    stream_failed = true;
                    break;
                }
                StreamEvent::Done => break,
            }
        }

        // A failed stream ends the turn even if tool results were already
        // collected; continuing on a known-broken exchange buys nothing.
        // The last round never gets a continuation either.
        if stream_failed || round_tool_results.is_empty() || round + 1 == turn.max_tool_rounds {
            break;
        }

        // Keep conversation history coherent for the continuation request.
        if !round_text.is_empty() {
            conversation.push(ProviderMessage {
                role: MessageRole::Assistant,
                content: round_text,
            });
        }

        tracing::debug!(
            round,
            tool_results = round_tool_results.len(),
            "Continuing with tool results"
        );

        let continue_request = ToolContinueRequest {
            model: turn.model.clone(),
            system: TRAVEL_CONCIERGE_PROMPT.to_string(),
            messages: conversation.clone(),
            tools: tools.clone(),
            tool_results: round_tool_results,
        };

        rx = provider.continue_with_tools_stream(continue_request).await?;
    }

    // Emit any buffered partial word.
    if let Some(rest) = chunker.flush() {
        tx.send(ChatEvent::Delta { content: rest }).await?;
    }

    // Persist the assistant message best-effort; a storage failure must not
    // turn an already-delivered stream into an error.
    let content = accumulated_text.trim();
    if !content.is_empty() {
        let reasoning = if accumulated_reasoning.is_empty() {
            None
        } else {
            Some(accumulated_reasoning.as_str())
        };
        if let Err(e) = store
            .save_message(&message_id, &turn.chat_id, "assistant", content, reasoning)
            .await
        {
            tracing::warn!(chat_id = %turn.chat_id, "Failed to persist assistant message: {}", e);
        }
    }

    tx.send(ChatEvent::Done { message_id }).await?;

    Ok(())
}
