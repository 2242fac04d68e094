//! Bearer-token sessions
//!
//! Identity is an external concern; this is only the token-to-user lookup
//! the service needs for ownership checks and the 401 path.

use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Resolve a bearer token to a user id.
    pub async fn user_for_token(&self, token: &str) -> sqlx::Result<Option<String>> {
        sqlx::query_scalar("SELECT user_id FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(&self, token: &str, user_id: &str) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(token)
            .bind(user_id)
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
