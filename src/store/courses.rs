//! Booked CME courses

use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourseRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub venue: String,
    pub venue_address: String,
    pub start_date: i64,
    pub end_date: i64,
    pub created_at: i64,
}

#[derive(Clone)]
pub struct CourseStore {
    pool: SqlitePool,
}

impl CourseStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The user's most recently booked course.
    pub async fn latest_for_user(&self, user_id: &str) -> sqlx::Result<Option<CourseRow>> {
        sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, user_id, title, venue, venue_address, start_date, end_date, created_at
            FROM courses
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert(
        &self,
        id: &str,
        user_id: &str,
        title: &str,
        venue: &str,
        venue_address: &str,
        start_date: i64,
        end_date: i64,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO courses (id, user_id, title, venue, venue_address, start_date, end_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(venue)
        .bind(venue_address)
        .bind(start_date)
        .bind(end_date)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
