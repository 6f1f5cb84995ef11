//! SQLite profile store implementation.

use chrono::{DateTime, Utc};

use halcyon_core::chat::repository::ProfileStore;
use halcyon_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ProfileStore`.
pub struct SqliteProfileStore {
    pool: DatabasePool,
}

impl SqliteProfileStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl ProfileStore for SqliteProfileStore {
    async fn upsert_last_activity(
        &self,
        user_id: &str,
        email: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        // Merge semantics: last activity always moves forward, email is
        // only written when the caller has one. COALESCE keeps a stored
        // email from being nulled out.
        sqlx::query(
            r#"INSERT INTO profiles (user_id, email, last_chat_activity)
               VALUES (?, ?, ?)
               ON CONFLICT(user_id) DO UPDATE SET
                   email = COALESCE(excluded.email, profiles.email),
                   last_chat_activity = excluded.last_chat_activity"#,
        )
        .bind(user_id)
        .bind(email)
        .bind(at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn fetch_profile(pool: &DatabasePool, user_id: &str) -> (Option<String>, String) {
        let row = sqlx::query("SELECT email, last_chat_activity FROM profiles WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        (row.get("email"), row.get("last_chat_activity"))
    }

    #[tokio::test]
    async fn test_upsert_creates_profile() {
        let pool = test_pool().await;
        let store = SqliteProfileStore::new(pool.clone());

        let at = Utc::now();
        store
            .upsert_last_activity("u1", Some("u1@example.com"), at)
            .await
            .unwrap();

        let (email, activity) = fetch_profile(&pool, "u1").await;
        assert_eq!(email.as_deref(), Some("u1@example.com"));
        assert_eq!(activity, at.to_rfc3339());
    }

    #[tokio::test]
    async fn test_upsert_without_email_keeps_stored_email() {
        let pool = test_pool().await;
        let store = SqliteProfileStore::new(pool.clone());

        let first = Utc::now();
        store
            .upsert_last_activity("u1", Some("u1@example.com"), first)
            .await
            .unwrap();

        let later = first + chrono::Duration::seconds(60);
        store.upsert_last_activity("u1", None, later).await.unwrap();

        let (email, activity) = fetch_profile(&pool, "u1").await;
        assert_eq!(email.as_deref(), Some("u1@example.com"));
        assert_eq!(activity, later.to_rfc3339());
    }
}
