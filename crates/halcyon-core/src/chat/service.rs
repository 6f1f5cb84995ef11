//! Chat service orchestrating authorization-bound chat operations.
//!
//! ChatService coordinates the conversation store, profile store, and
//! completion engine for the three chat operations: send message, fetch
//! history, clear history. Handlers authenticate the caller first; this
//! service only ever sees a verified identity.

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use tracing::{info, warn};

use halcyon_types::completion::{CompletionError, CompletionRequest};
use halcyon_types::error::RepositoryError;
use halcyon_types::message::{MessageRole, NewMessage, StoredMessage, Turn};
use halcyon_types::user::VerifiedUser;

use crate::chat::context;
use crate::chat::repository::{ConversationStore, DELETE_BATCH_SIZE, ProfileStore};
use crate::llm::engine::CompletionEngine;

/// Maximum number of messages returned by a history fetch.
pub const HISTORY_FETCH_LIMIT: u32 = 50;

/// Errors from chat operations.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message is required")]
    EmptyMessage,

    #[error("completion engine failed: {0}")]
    Upstream(#[from] CompletionError),

    #[error("store failure: {0}")]
    Store(#[from] RepositoryError),
}

/// Result of a successful send: the assistant reply and the shared
/// server-assigned timestamp of both persisted turns.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// Orchestrates the authenticated chat pipeline.
///
/// Generic over `ConversationStore`, `ProfileStore`, and
/// `CompletionEngine` to keep halcyon-core free of infra dependencies.
pub struct ChatService<C, P, E>
where
    C: ConversationStore,
    P: ProfileStore,
    E: CompletionEngine,
{
    conversations: C,
    profiles: P,
    engine: E,
    persona: String,
    model: String,
}

impl<C, P, E> ChatService<C, P, E>
where
    C: ConversationStore,
    P: ProfileStore,
    E: CompletionEngine,
{
    /// Create a new chat service with the given collaborators.
    pub fn new(conversations: C, profiles: P, engine: E, persona: String, model: String) -> Self {
        Self {
            conversations,
            profiles,
            engine,
            persona,
            model,
        }
    }

    /// Access the conversation store.
    pub fn conversations(&self) -> &C {
        &self.conversations
    }

    /// Send a message on behalf of a verified user.
    ///
    /// The context window is assembled from the CLIENT-echoed history,
    /// not re-fetched from the store; only durability is
    /// store-authoritative. Nothing is persisted unless the engine
    /// produced a non-empty reply: the user turn, the assistant turn
    /// (sharing one server-assigned timestamp), and the profile's
    /// last-activity upsert all happen after the completion succeeds.
    pub async fn send_message(
        &self,
        user: &VerifiedUser,
        text: &str,
        client_history: &[Turn],
    ) -> Result<SendOutcome, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let window = context::assemble(&self.persona, client_history, text);
        let request = CompletionRequest::with_defaults(self.model.clone(), window);

        let reply = self.engine.complete(&request).await?;
        if reply.content.trim().is_empty() {
            return Err(ChatError::Upstream(CompletionError::EmptyReply));
        }

        // One timestamp for both turns of the exchange; ordering is the
        // store's insertion sequence.
        let timestamp = Utc::now();

        self.conversations
            .append_message(
                &user.subject,
                &NewMessage {
                    role: MessageRole::User,
                    content: text.to_string(),
                    timestamp,
                },
            )
            .await?;

        self.conversations
            .append_message(
                &user.subject,
                &NewMessage {
                    role: MessageRole::Assistant,
                    content: reply.content.clone(),
                    timestamp,
                },
            )
            .await?;

        self.profiles
            .upsert_last_activity(&user.subject, user.email.as_deref(), timestamp)
            .await?;

        info!(user = %user.subject, model = %reply.model, "chat exchange persisted");

        Ok(SendOutcome {
            response: reply.content,
            timestamp,
        })
    }

    /// Fetch up to [`HISTORY_FETCH_LIMIT`] messages for a user, oldest
    /// first. Read-only.
    pub async fn history(&self, user_id: &str) -> Result<Vec<StoredMessage>, ChatError> {
        Ok(self
            .conversations
            .list_messages(user_id, HISTORY_FETCH_LIMIT)
            .await?)
    }

    /// Erase a user's conversation entirely.
    ///
    /// Deletion runs as batches of at most [`DELETE_BATCH_SIZE`] ids,
    /// issued concurrently and all awaited before the result is
    /// computed. Any failed batch fails the whole operation; partial
    /// deletion is possible but never reported as success. Clearing an
    /// already-empty conversation succeeds trivially.
    pub async fn clear_history(&self, user_id: &str) -> Result<(), ChatError> {
        let ids = self.conversations.list_message_ids(user_id).await?;
        if ids.is_empty() {
            return Ok(());
        }

        let batches = ids
            .chunks(DELETE_BATCH_SIZE)
            .map(|batch| self.conversations.delete_batch(user_id, batch));
        let results = join_all(batches).await;

        let total = results.len();
        for result in results {
            if let Err(e) = result {
                warn!(user = %user_id, error = %e, "batched delete failed");
                return Err(ChatError::Store(e));
            }
        }

        info!(user = %user_id, batches = total, deleted = ids.len(), "conversation cleared");
        Ok(())
    }
}
