//! SQLite comment store implementation.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use halcyon_core::comment::repository::CommentStore;
use halcyon_types::comment::{Comment, NewComment};
use halcyon_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CommentStore`.
pub struct SqliteCommentStore {
    pool: DatabasePool,
}

impl SqliteCommentStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn load_comment(&self, comment_id: Uuid) -> Result<Comment, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, text, user_id, user_email, user_name, created_at FROM comments WHERE id = ?",
        )
        .bind(comment_id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        let likes = self.load_likes(comment_id).await?;
        comment_from_row(&row, likes)
    }

    async fn load_likes(&self, comment_id: Uuid) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT user_id FROM comment_likes WHERE comment_id = ?")
            .bind(comment_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get("user_id")
                    .map_err(|e| RepositoryError::Query(e.to_string()))
            })
            .collect()
    }
}

fn comment_from_row(
    row: &sqlx::sqlite::SqliteRow,
    likes: Vec<String>,
) -> Result<Comment, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    let like_count = likes.len() as u32;
    Ok(Comment {
        id: id
            .parse::<Uuid>()
            .map_err(|e| RepositoryError::Query(format!("invalid UUID: {e}")))?,
        text: row
            .try_get("text")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        user_id: row
            .try_get("user_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        user_email: row
            .try_get("user_email")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        user_name: row
            .try_get("user_name")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        timestamp: DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))?,
        likes,
        like_count,
    })
}

impl CommentStore for SqliteCommentStore {
    async fn list_comments(&self, limit: u32) -> Result<Vec<Comment>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, text, user_id, user_email, user_name, created_at FROM comments
             ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let comment_id = id
                .parse::<Uuid>()
                .map_err(|e| RepositoryError::Query(format!("invalid UUID: {e}")))?;
            let likes = self.load_likes(comment_id).await?;
            comments.push(comment_from_row(row, likes)?);
        }
        Ok(comments)
    }

    async fn add_comment(&self, comment: &NewComment) -> Result<Comment, RepositoryError> {
        let id = Uuid::now_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO comments (id, text, user_id, user_email, user_name, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&comment.text)
        .bind(&comment.user_id)
        .bind(&comment.user_email)
        .bind(&comment.user_name)
        .bind(now.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Comment {
            id,
            text: comment.text.clone(),
            user_id: comment.user_id.clone(),
            user_email: comment.user_email.clone(),
            user_name: comment.user_name.clone(),
            timestamp: now,
            likes: Vec::new(),
            like_count: 0,
        })
    }

    async fn toggle_like(
        &self,
        comment_id: Uuid,
        user_id: &str,
    ) -> Result<Comment, RepositoryError> {
        // Existence check first so an unknown comment reports NotFound
        // rather than silently inserting an orphan like.
        let exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE id = ?")
            .bind(comment_id.to_string())
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        if exists.0 == 0 {
            return Err(RepositoryError::NotFound);
        }

        let removed =
            sqlx::query("DELETE FROM comment_likes WHERE comment_id = ? AND user_id = ?")
                .bind(comment_id.to_string())
                .bind(user_id)
                .execute(&self.pool.writer)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if removed.rows_affected() == 0 {
            sqlx::query("INSERT INTO comment_likes (comment_id, user_id) VALUES (?, ?)")
                .bind(comment_id.to_string())
                .bind(user_id)
                .execute(&self.pool.writer)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        self.load_comment(comment_id).await
    }
}
