//! HTTP handlers

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use chrono::{Duration, Utc};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use uuid::Uuid;

use super::auth::{authenticate, ensure_owner};
use super::types::{
    ChatEvent, ChatRequestBody, DeleteChatQuery, MessagesQuery, MessageView, VotePatchBody,
    VoteQuery, VoteView,
};
use super::AppState;
use crate::chat::provider::{Message as ProviderMessage, MessageRole};
use crate::chat::{process_chat, title, ChatTurn};
use crate::error::ApiError;
use crate::tools::ToolExecutor;

const BYPASS_CHAT_TYPE: &str = "travel-concierge";

/// POST /api/chat - stream a chat turn as SSE
pub async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ChatRequestBody>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let bypass_requested = body.chat_type.as_deref() == Some(BYPASS_CHAT_TYPE);
    let user_id = authenticate(&state, &headers, bypass_requested).await?;
    let bypass = bypass_requested && state.config.allow_test_bypass;

    let user_message = body
        .messages
        .iter()
        .rev()
        .find(|m| m.role == "user")
        .ok_or_else(|| ApiError::Validation("No user message found".into()))?
        .content
        .clone();

    // Resolve or create the chat before anything is persisted.
    match state.chats.get_chat(&body.id).await? {
        Some(chat) => {
            if !bypass {
                ensure_owner(&chat.user_id, &user_id)?;
            }
        }
        None => {
            let chat_title =
                title::generate_title(&state.provider, &state.config.title_model, &user_message)
                    .await;
            state
                .chats
                .create_chat(&body.id, &user_id, &chat_title)
                .await?;
        }
    }

    let user_message_id = Uuid::new_v4().to_string();
    state
        .chats
        .save_message(&user_message_id, &body.id, "user", &user_message, None)
        .await?;

    let conversation: Vec<ProviderMessage> = body
        .messages
        .iter()
        .map(|m| ProviderMessage {
            role: match m.role.as_str() {
                "assistant" => MessageRole::Assistant,
                "system" => MessageRole::System,
                "tool" => MessageRole::Tool,
                _ => MessageRole::User,
            },
            content: m.content.clone(),
        })
        .collect();

    let turn = ChatTurn {
        chat_id: body.id.clone(),
        model: body
            .selected_chat_model
            .unwrap_or_else(|| state.config.chat_model.clone()),
        max_tokens: state.config.max_output_tokens,
        max_tool_rounds: state.config.max_tool_rounds,
        messages: conversation,
    };

    let executor = ToolExecutor::new(
        state.provider.clone(),
        state.catalog.clone(),
        state.courses.clone(),
    )
    .for_user(&user_id)
    .with_plan_model(&state.config.plan_model);

    let (tx, rx) = mpsc::channel::<ChatEvent>(100);
    let provider = state.provider.clone();
    let chats = state.chats.clone();

    tokio::spawn(async move {
        if let Err(e) = process_chat(provider, executor, chats, turn, tx.clone()).await {
            tracing::error!("Chat processing failed: {}", e);
            let _ = tx
                .send(ChatEvent::Error {
                    message: e.to_string(),
                })
                .await;
        }
    });

    let stream = ReceiverStream::new(rx).map(|event| {
        let data = serde_json::to_string(&event).unwrap_or_default();
        Ok(Event::default().data(data))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// DELETE /api/chat?id= - delete a chat and its messages
pub async fn delete_chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeleteChatQuery>,
) -> Result<Json<Value>, ApiError> {
    let user_id = authenticate(&state, &headers, false).await?;

    let chat = state
        .chats
        .get_chat(&query.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Chat not found".into()))?;
    ensure_owner(&chat.user_id, &user_id)?;

    state.chats.delete_chat(&query.id).await?;

    Ok(Json(json!({ "success": true })))
}

/// GET /api/messages?chatId=&limit= - message history for a chat
pub async fn messages_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<MessageView>>, ApiError> {
    let user_id = authenticate(&state, &headers, false).await?;

    let chat = state
        .chats
        .get_chat(&query.chat_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Chat not found".into()))?;
    ensure_owner(&chat.user_id, &user_id)?;

    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let messages = state.chats.list_messages(&query.chat_id, limit).await?;

    Ok(Json(
        messages
            .into_iter()
            .map(|m| MessageView {
                id: m.id,
                chat_id: m.chat_id,
                role: m.role,
                content: m.content,
                reasoning: m.reasoning,
                created_at: m.created_at,
            })
            .collect(),
    ))
}

/// GET /api/vote?chatId= - votes for a chat
pub async fn vote_get_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<VoteQuery>,
) -> Result<Json<Vec<VoteView>>, ApiError> {
    let bypass_requested = query.chat_type.as_deref() == Some(BYPASS_CHAT_TYPE);
    let user_id = authenticate(&state, &headers, bypass_requested).await?;
    let bypass = bypass_requested && state.config.allow_test_bypass;

    let chat = state
        .chats
        .get_chat(&query.chat_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Chat not found".into()))?;
    if !bypass {
        ensure_owner(&chat.user_id, &user_id)?;
    }

    let votes = state.chats.votes_for_chat(&query.chat_id).await?;

    Ok(Json(
        votes
            .into_iter()
            .map(|v| VoteView {
                chat_id: v.chat_id,
                message_id: v.message_id,
                is_upvoted: v.is_upvoted,
            })
            .collect(),
    ))
}

/// PATCH /api/vote - upvote or downvote a message
pub async fn vote_patch_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<VotePatchBody>,
) -> Result<Json<Value>, ApiError> {
    let is_upvoted = match body.vote_type.as_str() {
        "up" => true,
        "down" => false,
        _ => return Err(ApiError::Validation("type must be 'up' or 'down'".into())),
    };

    let user_id = authenticate(&state, &headers, body.is_travel_concierge_test).await?;
    let bypass = body.is_travel_concierge_test && state.config.allow_test_bypass;

    let chat = state
        .chats
        .get_chat(&body.chat_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Chat not found".into()))?;
    if !bypass {
        ensure_owner(&chat.user_id, &user_id)?;
    }

    state
        .chats
        .set_vote(&body.chat_id, &body.message_id, is_upvoted)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// POST /api/test/insert-course - seed a test course for the caller
///
/// Only mounted when the test bypass is enabled.
pub async fn insert_course_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let user_id = authenticate(&state, &headers, true).await?;

    // Three-day course a month out, 08:00 to 17:00 UTC.
    let first_day = (Utc::now() + Duration::days(30)).date_naive();
    let start = first_day
        .and_time(chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default())
        .and_utc();
    let end = (first_day + Duration::days(2))
        .and_time(chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default())
        .and_utc();

    let course_id = Uuid::new_v4().to_string();
    state
        .courses
        .insert(
            &course_id,
            &user_id,
            "Advanced Cardiac Imaging CME Course",
            "Caesars Forum Conference Center",
            "3911 Koval Ln, Las Vegas, NV 89109",
            start.timestamp(),
            end.timestamp(),
        )
        .await?;

    Ok(Json(json!({ "success": true, "courseId": course_id })))
}

/// POST /api/course-webhook - booking system acknowledgement stub
pub async fn course_webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(_payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    authenticate(&state, &headers, false).await?;
    Ok(Json(json!({ "success": true })))
}

/// GET /api/status - health check
pub async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    let db_ok = sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();

    Json(json!({
        "status": "ok",
        "database": db_ok,
        "model": state.config.chat_model,
    }))
}
