//! Login session tokens

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::DbError;

/// Session repository
pub struct SessionRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Start a session for `uid` and return its token.
    pub async fn create(&self, uid: &str) -> Result<String, DbError> {
        let token = Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO sessions (token, uid, created_at) VALUES (?, ?, ?)")
            .bind(&token)
            .bind(uid)
            .bind(Utc::now())
            .execute(self.pool)
            .await?;

        Ok(token)
    }

    /// Member id behind `token`, if the session exists.
    pub async fn lookup(&self, token: &str) -> Result<Option<String>, DbError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT uid FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(|(uid,)| uid))
    }

    /// End a session. Returns false if it did not exist.
    pub async fn revoke(&self, token: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
