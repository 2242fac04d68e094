//! HTTP server
//!
//! - POST /api/chat - SSE streaming chat
//! - DELETE /api/chat?id= - delete a chat
//! - GET /api/messages?chatId= - message history
//! - GET/PATCH /api/vote - message votes
//! - POST /api/course-webhook - booking acknowledgement
//! - GET /api/status - health check
//! - POST /api/test/insert-course - seed course (test bypass builds only)

mod auth;
mod handlers;
pub mod types;

pub use auth::MOCK_USER_ID;
pub use types::ChatEvent;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::chat::provider::Provider;
use crate::config::Config;
use crate::store::{ChatStore, CourseStore, SessionStore};
use crate::tools::TravelCatalog;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub chats: ChatStore,
    pub courses: CourseStore,
    pub sessions: SessionStore,
    pub provider: Arc<dyn Provider>,
    pub catalog: Arc<dyn TravelCatalog>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        provider: Arc<dyn Provider>,
        catalog: Arc<dyn TravelCatalog>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            chats: ChatStore::new(pool.clone()),
            courses: CourseStore::new(pool.clone()),
            sessions: SessionStore::new(pool.clone()),
            pool,
            provider,
            catalog,
            config,
        }
    }
}

/// Build the API router. The test seeding route exists only when the
/// config allows the test bypass.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(
            "/api/chat",
            post(handlers::chat_handler).delete(handlers::delete_chat_handler),
        )
        .route("/api/messages", get(handlers::messages_handler))
        .route(
            "/api/vote",
            get(handlers::vote_get_handler).patch(handlers::vote_patch_handler),
        )
        .route("/api/course-webhook", post(handlers::course_webhook_handler))
        .route("/api/status", get(handlers::status_handler));

    if state.config.allow_test_bypass {
        router = router.route(
            "/api/test/insert-course",
            post(handlers::insert_course_handler),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
