//! ConversationStore and ProfileStore trait definitions.
//!
//! The conversation store is an ordered, per-user append-only log of
//! messages plus a mutable per-user profile record. Implementations live
//! in halcyon-infra (e.g., `SqliteConversationStore`). Uses native async
//! fn in traits (RPITIT, Rust 2024 edition).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use halcyon_types::error::RepositoryError;
use halcyon_types::message::{NewMessage, StoredMessage};

/// Maximum number of message ids per delete batch.
///
/// Mirrors the store's batched-write limit; `ChatService::clear_history`
/// chunks deletions to this size.
pub const DELETE_BATCH_SIZE: usize = 500;

/// Ordered, per-user append-only message log.
///
/// Ordering is defined by insertion sequence. Appends within one request
/// may share a timestamp, so implementations must never order by
/// timestamp alone.
pub trait ConversationStore: Send + Sync {
    /// Append a message to a user's conversation. The conversation is
    /// created implicitly on first append.
    fn append_message(
        &self,
        user_id: &str,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<StoredMessage, RepositoryError>> + Send;

    /// List up to `limit` messages for a user, oldest first.
    fn list_messages(
        &self,
        user_id: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<StoredMessage>, RepositoryError>> + Send;

    /// List every message id for a user, oldest first.
    fn list_message_ids(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Uuid>, RepositoryError>> + Send;

    /// Delete the given messages from a user's conversation.
    ///
    /// Callers bound `ids` to [`DELETE_BATCH_SIZE`]; one call is one
    /// batch commit against the store.
    fn delete_batch(
        &self,
        user_id: &str,
        ids: &[Uuid],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Count messages in a user's conversation.
    fn count_messages(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}

/// Mutable per-user profile record.
pub trait ProfileStore: Send + Sync {
    /// Upsert a user's profile non-destructively: last activity is always
    /// written, email only when provided.
    fn upsert_last_activity(
        &self,
        user_id: &str,
        email: Option<&str>,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
