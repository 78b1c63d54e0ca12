//! Post creation with attachments

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Attachment, NewBoard};

use super::DbError;

/// Repository for posts that carry uploaded files
pub struct FileRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a post and its attachment rows (atomic). Returns the new bno.
    pub async fn insert_board(
        &self,
        board: &NewBoard,
        attachs: &[Attachment],
    ) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;

        let bno = sqlx::query(
            "INSERT INTO boards (title, userid, contents, regdate) VALUES (?, ?, ?, ?)",
        )
        .bind(board.title())
        .bind(board.userid())
        .bind(board.contents())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for attach in attachs {
            sqlx::query(
                "INSERT INTO board_attachs (bno, fname, stored_name, fsize) VALUES (?, ?, ?, ?)",
            )
            .bind(bno)
            .bind(&attach.fname)
            .bind(&attach.stored_name)
            .bind(attach.fsize)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(bno)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::BoardRepo;
    use crate::db::testing::create_migrated_pool;

    fn attach(stored: &str) -> Attachment {
        Attachment {
            fname: "notes.txt".to_string(),
            stored_name: stored.to_string(),
            fsize: 12,
        }
    }

    #[tokio::test]
    async fn inserts_post_with_attachments() {
        let pool = create_migrated_pool().await;
        let board = NewBoard::new("with files", "alice", "see attached").unwrap();

        let bno = FileRepo::new(&pool)
            .insert_board(&board, &[attach("a_notes.txt"), attach("b_notes.txt")])
            .await
            .unwrap();

        let detail = BoardRepo::new(&pool).selectone_board(bno).await.unwrap();
        assert_eq!(detail.board.title, "with files");
        assert_eq!(detail.attachs.len(), 2);
        assert_eq!(detail.attachs[0].stored_name, "a_notes.txt");
    }

    #[tokio::test]
    async fn failed_attachment_rolls_back_post() {
        let pool = create_migrated_pool().await;
        let board = NewBoard::new("broken", "alice", "dup files").unwrap();

        // stored_name is UNIQUE, so the second row fails
        let result = FileRepo::new(&pool)
            .insert_board(&board, &[attach("same.txt"), attach("same.txt")])
            .await;
        assert!(result.is_err());

        let (posts,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boards")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(posts, 0);
    }

    #[tokio::test]
    async fn delete_reports_stored_files() {
        let pool = create_migrated_pool().await;
        let board = NewBoard::new("t", "alice", "c").unwrap();
        let bno = FileRepo::new(&pool)
            .insert_board(&board, &[attach("x.bin")])
            .await
            .unwrap();

        let outcome = BoardRepo::new(&pool).delete_board(bno).await.unwrap();
        assert_eq!(outcome.stored_files, vec!["x.bin".to_string()]);

        let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM board_attachs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }
}
