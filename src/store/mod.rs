//! SQLite persistence
//!
//! Schema is created idempotently at startup; all timestamps are unix
//! seconds stored as INTEGER.

mod chats;
mod courses;
mod sessions;

pub use chats::{ChatRow, ChatStore, MessageRow, VoteRow};
pub use courses::{CourseRow, CourseStore};
pub use sessions::SessionStore;

use anyhow::Result;
use sqlx::{Executor, SqlitePool};

const CREATE_CHATS: &str = r#"
CREATE TABLE IF NOT EXISTS chats (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
"#;

const CREATE_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id TEXT PRIMARY KEY,
    chat_id TEXT NOT NULL REFERENCES chats(id) ON DELETE CASCADE,
    role TEXT NOT NULL,
    content TEXT NOT NULL,
    reasoning TEXT,
    created_at INTEGER NOT NULL
);
"#;

const CREATE_VOTES: &str = r#"
CREATE TABLE IF NOT EXISTS votes (
    chat_id TEXT NOT NULL REFERENCES chats(id) ON DELETE CASCADE,
    message_id TEXT NOT NULL,
    is_upvoted INTEGER NOT NULL,
    PRIMARY KEY (chat_id, message_id)
);
"#;

const CREATE_COURSES: &str = r#"
CREATE TABLE IF NOT EXISTS courses (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    venue TEXT NOT NULL,
    venue_address TEXT NOT NULL,
    start_date INTEGER NOT NULL,
    end_date INTEGER NOT NULL,
    created_at INTEGER NOT NULL
);
"#;

const CREATE_SESSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    token TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
"#;

const CREATE_INDICES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_messages_chat_id ON messages(chat_id);
CREATE INDEX IF NOT EXISTS idx_chats_user_id ON chats(user_id);
CREATE INDEX IF NOT EXISTS idx_courses_user_id ON courses(user_id, created_at);
"#;

/// Run all migrations. Safe to call on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute("PRAGMA foreign_keys = ON;").await?;
    pool.execute(CREATE_CHATS).await?;
    pool.execute(CREATE_MESSAGES).await?;
    pool.execute(CREATE_VOTES).await?;
    pool.execute(CREATE_COURSES).await?;
    pool.execute(CREATE_SESSIONS).await?;
    pool.execute(CREATE_INDICES).await?;
    tracing::debug!("Database migrations complete");
    Ok(())
}
