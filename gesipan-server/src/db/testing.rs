use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// In-memory pool with a single connection so every query sees the same
/// database. Tables are not created; see [`create_migrated_pool`].
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap()
}

pub async fn create_migrated_pool() -> SqlitePool {
    let pool = create_test_pool().await;
    super::migrations::run(&pool).await.unwrap();
    pool
}

/// Insert a post directly and return its bno.
pub async fn seed_board(pool: &SqlitePool, title: &str, userid: &str) -> i64 {
    sqlx::query("INSERT INTO boards (title, userid, contents, regdate) VALUES (?, ?, ?, ?)")
        .bind(title)
        .bind(userid)
        .bind(format!("contents of {title}"))
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}
