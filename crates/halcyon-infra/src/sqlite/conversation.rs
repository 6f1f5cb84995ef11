//! SQLite conversation store implementation.
//!
//! Implements `ConversationStore` from `halcyon-core` using sqlx with
//! split read/write pools. Ordering comes from the AUTOINCREMENT `seq`
//! column, never from `created_at`: both turns of one exchange share a
//! timestamp.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use halcyon_core::chat::repository::{ConversationStore, DELETE_BATCH_SIZE};
use halcyon_types::error::RepositoryError;
use halcyon_types::message::{MessageRole, NewMessage, StoredMessage};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationStore`.
pub struct SqliteConversationStore {
    pool: DatabasePool,
}

impl SqliteConversationStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn parse_uuid(s: &str) -> Result<Uuid, RepositoryError> {
    s.parse::<Uuid>()
        .map_err(|e| RepositoryError::Query(format!("invalid UUID: {e}")))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn message_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<StoredMessage, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let role: String = row
        .try_get("role")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let content: String = row
        .try_get("content")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(StoredMessage {
        id: parse_uuid(&id)?,
        role: role.parse::<MessageRole>().map_err(RepositoryError::Query)?,
        content,
        timestamp: parse_datetime(&created_at)?,
    })
}

impl ConversationStore for SqliteConversationStore {
    async fn append_message(
        &self,
        user_id: &str,
        message: &NewMessage,
    ) -> Result<StoredMessage, RepositoryError> {
        let id = Uuid::now_v7();

        sqlx::query(
            "INSERT INTO messages (id, owner_id, role, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(user_id)
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(message.timestamp.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(StoredMessage {
            id,
            role: message.role,
            content: message.content.clone(),
            timestamp: message.timestamp,
        })
    }

    async fn list_messages(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<StoredMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, role, content, created_at FROM messages
             WHERE owner_id = ? ORDER BY seq ASC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            messages.push(message_from_row(row)?);
        }
        Ok(messages)
    }

    async fn list_message_ids(&self, user_id: &str) -> Result<Vec<Uuid>, RepositoryError> {
        let rows = sqlx::query("SELECT id FROM messages WHERE owner_id = ? ORDER BY seq ASC")
            .bind(user_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut ids = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            ids.push(parse_uuid(&id)?);
        }
        Ok(ids)
    }

    async fn delete_batch(&self, user_id: &str, ids: &[Uuid]) -> Result<(), RepositoryError> {
        if ids.is_empty() {
            return Ok(());
        }
        if ids.len() > DELETE_BATCH_SIZE {
            return Err(RepositoryError::Query(format!(
                "delete batch of {} exceeds limit {DELETE_BATCH_SIZE}",
                ids.len()
            )));
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql =
            format!("DELETE FROM messages WHERE owner_id = ? AND id IN ({placeholders})");

        let mut query = sqlx::query(&sql).bind(user_id);
        for id in ids {
            query = query.bind(id.to_string());
        }
        query
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn count_messages(&self, user_id: &str) -> Result<u64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE owner_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count.0 as u64)
    }
}
