//! Database migrations for board tables

use sqlx::SqlitePool;

use super::DbError;

/// Run all migrations. Every statement is idempotent.
pub async fn run(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Running board migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS boards (
            bno INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            userid TEXT NOT NULL,
            contents TEXT NOT NULL,
            regdate TEXT NOT NULL,
            views INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS board_attachs (
            ano INTEGER PRIMARY KEY AUTOINCREMENT,
            bno INTEGER NOT NULL REFERENCES boards(bno) ON DELETE CASCADE,
            fname TEXT NOT NULL,
            stored_name TEXT NOT NULL UNIQUE,
            fsize INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS replies (
            rno INTEGER PRIMARY KEY AUTOINCREMENT,
            reply TEXT NOT NULL,
            userid TEXT NOT NULL,
            regdate TEXT NOT NULL,
            bno INTEGER NOT NULL REFERENCES boards(bno) ON DELETE CASCADE,
            rpno INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            uid TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_board_attachs_bno ON board_attachs(bno)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_replies_thread ON replies(bno, rpno, rno)")
        .execute(pool)
        .await?;

    tracing::info!("Board migrations complete");
    Ok(())
}
