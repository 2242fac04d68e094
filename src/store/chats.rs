//! Chats, messages, and votes

use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRow {
    pub id: String,
    pub chat_id: String,
    pub role: String,
    pub content: String,
    pub reasoning: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VoteRow {
    pub chat_id: String,
    pub message_id: String,
    pub is_upvoted: bool,
}

#[derive(Clone)]
pub struct ChatStore {
    pool: SqlitePool,
}

impl ChatStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_chat(&self, id: &str, user_id: &str, title: &str) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO chats (id, user_id, title, created_at) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(user_id)
            .bind(title)
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_chat(&self, id: &str) -> sqlx::Result<Option<ChatRow>> {
        sqlx::query_as::<_, ChatRow>(
            "SELECT id, user_id, title, created_at FROM chats WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a chat; messages and votes cascade.
    pub async fn delete_chat(&self, id: &str) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM chats WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn save_message(
        &self,
        id: &str,
        chat_id: &str,
        role: &str,
        content: &str,
        reasoning: Option<&str>,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, chat_id, role, content, reasoning, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(chat_id)
        .bind(role)
        .bind(content)
        .bind(reasoning)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Messages for a chat, oldest first.
    pub async fn list_messages(&self, chat_id: &str, limit: i64) -> sqlx::Result<Vec<MessageRow>> {
        sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, chat_id, role, content, reasoning, created_at
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2
            "#,
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn message_count(&self, chat_id: &str) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE chat_id = $1")
            .bind(chat_id)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn votes_for_chat(&self, chat_id: &str) -> sqlx::Result<Vec<VoteRow>> {
        sqlx::query_as::<_, VoteRow>(
            "SELECT chat_id, message_id, is_upvoted FROM votes WHERE chat_id = $1",
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Upsert a vote on a message.
    pub async fn set_vote(
        &self,
        chat_id: &str,
        message_id: &str,
        is_upvoted: bool,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO votes (chat_id, message_id, is_upvoted)
            VALUES ($1, $2, $3)
            ON CONFLICT (chat_id, message_id) DO UPDATE SET is_upvoted = $3
            "#,
        )
        .bind(chat_id)
        .bind(message_id)
        .bind(is_upvoted)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
