//! Chat title generation

use std::sync::Arc;

use crate::chat::provider::{ChatRequest, Message, MessageRole, Provider};

const TITLE_SYSTEM_PROMPT: &str = "\
You generate a short title based on the first message a user begins a \
conversation with. Keep it under 80 characters. Summarize the user's \
message. Do not use quotes or colons.";

/// Generate a chat title from the first user message.
///
/// Falls back to a truncated form of the message if the model call fails;
/// a failed title must never block the chat turn.
pub async fn generate_title(
    provider: &Arc<dyn Provider>,
    model: &str,
    first_message: &str,
) -> String {
    let request = ChatRequest::new(model, TITLE_SYSTEM_PROMPT)
        .with_messages(vec![Message {
            role: MessageRole::User,
            content: first_message.to_string(),
        }])
        .with_max_tokens(60);

    match provider.create(request).await {
        Ok(response) if !response.text.trim().is_empty() => {
            response.text.trim().trim_matches('"').to_string()
        }
        Ok(_) => fallback_title(first_message),
        Err(e) => {
            tracing::warn!("Title generation failed: {}", e);
            fallback_title(first_message)
        }
    }
}

fn fallback_title(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.chars().count() <= 80 {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(77).collect();
        format!("{}...", cut)
    }
}
