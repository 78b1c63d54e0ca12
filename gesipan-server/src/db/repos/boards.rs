//! Board repository
//!
//! Listing, search, single-post view with replies, reply insertion and
//! deletion.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{
    Board, BoardDetail, BoardSummary, NewReply, Paginated, Pagination, Reply, SearchFilter,
    StoredAttachment,
};

use super::DbError;

/// Result of deleting a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub rows_affected: u64,
    /// Upload-directory names of the attachments that went with the post
    pub stored_files: Vec<String>,
}

/// Board repository
pub struct BoardRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BoardRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// One page of posts, newest first, with the total post count.
    pub async fn select_board(
        &self,
        page: Pagination,
    ) -> Result<Paginated<BoardSummary>, DbError> {
        let items: Vec<BoardSummary> = sqlx::query_as(
            r#"
            SELECT bno, title, userid, regdate, views
            FROM boards
            ORDER BY bno DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boards")
            .fetch_one(self.pool)
            .await?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
        })
    }

    /// One page of posts matching `filter`, newest first.
    pub async fn find_board(
        &self,
        filter: &SearchFilter,
        page: Pagination,
    ) -> Result<Paginated<BoardSummary>, DbError> {
        let predicate = filter.ftype.predicate();
        let pattern = filter.pattern();

        let list_sql = format!(
            r#"
            SELECT bno, title, userid, regdate, views
            FROM boards
            WHERE {predicate}
            ORDER BY bno DESC
            LIMIT ?2 OFFSET ?3
            "#
        );
        let items: Vec<BoardSummary> = sqlx::query_as(&list_sql)
            .bind(&pattern)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM boards WHERE {predicate}");
        let (total,): (i64,) = sqlx::query_as(&count_sql)
            .bind(&pattern)
            .fetch_one(self.pool)
            .await?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
        })
    }

    /// Load a post with its attachments and replies, counting the view.
    pub async fn selectone_board(&self, bno: i64) -> Result<BoardDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let counted = sqlx::query("UPDATE boards SET views = views + 1 WHERE bno = ?")
            .bind(bno)
            .execute(&mut *tx)
            .await?;

        if counted.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "board",
                id: bno.to_string(),
            });
        }

        let board: Board = sqlx::query_as(
            "SELECT bno, title, userid, contents, regdate, views FROM boards WHERE bno = ?",
        )
        .bind(bno)
        .fetch_one(&mut *tx)
        .await?;

        let attachs: Vec<StoredAttachment> = sqlx::query_as(
            r#"
            SELECT ano, bno, fname, stored_name, fsize
            FROM board_attachs
            WHERE bno = ?
            ORDER BY ano
            "#,
        )
        .bind(bno)
        .fetch_all(&mut *tx)
        .await?;

        let replies: Vec<Reply> = sqlx::query_as(
            r#"
            SELECT rno, reply, userid, regdate, bno, rpno
            FROM replies
            WHERE bno = ?
            ORDER BY rpno, rno
            "#,
        )
        .bind(bno)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(BoardDetail {
            board,
            attachs,
            replies,
        })
    }

    /// Insert a root reply. Returns the new rno.
    pub async fn insert_reply(&self, reply: &NewReply) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;

        ensure_board_exists(&mut tx, reply.bno()).await?;

        let rno = sqlx::query(
            "INSERT INTO replies (reply, userid, regdate, bno, rpno) VALUES (?, ?, ?, ?, 0)",
        )
        .bind(reply.reply())
        .bind(reply.userid())
        .bind(Utc::now())
        .bind(reply.bno())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        // A root reply is its own thread root
        sqlx::query("UPDATE replies SET rpno = rno WHERE rno = ?")
            .bind(rno)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rno)
    }

    /// Insert a reply to the root reply `reply.parent()`. Returns the new rno.
    pub async fn insert_rreply(&self, reply: &NewReply) -> Result<i64, DbError> {
        let rpno = reply.parent().map_err(|_| DbError::NotFound {
            resource: "reply",
            id: "(none)".to_string(),
        })?;

        let mut tx = self.pool.begin().await?;

        let (parent_exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM replies WHERE rno = ? AND bno = ? AND rpno = rno)",
        )
        .bind(rpno)
        .bind(reply.bno())
        .fetch_one(&mut *tx)
        .await?;

        if !parent_exists {
            return Err(DbError::NotFound {
                resource: "reply",
                id: rpno.to_string(),
            });
        }

        let rno = sqlx::query(
            "INSERT INTO replies (reply, userid, regdate, bno, rpno) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(reply.reply())
        .bind(reply.userid())
        .bind(Utc::now())
        .bind(reply.bno())
        .bind(rpno)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;
        Ok(rno)
    }

    /// Delete a post. Replies and attachment rows go with it.
    pub async fn delete_board(&self, bno: i64) -> Result<DeleteOutcome, DbError> {
        let mut tx = self.pool.begin().await?;

        let stored_files: Vec<(String,)> =
            sqlx::query_as("SELECT stored_name FROM board_attachs WHERE bno = ?")
                .bind(bno)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM boards WHERE bno = ?")
            .bind(bno)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(DeleteOutcome {
            rows_affected: result.rows_affected(),
            stored_files: stored_files.into_iter().map(|(name,)| name).collect(),
        })
    }
}

async fn ensure_board_exists(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    bno: i64,
) -> Result<(), DbError> {
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM boards WHERE bno = ?)")
        .bind(bno)
        .fetch_one(&mut **tx)
        .await?;

    if !exists {
        return Err(DbError::NotFound {
            resource: "board",
            id: bno.to_string(),
        });
    }
    Ok(())
}
