//! Chat endpoint handlers.
//!
//! All three operations share the same authorization preamble via the
//! [`AuthUser`] extractor: missing or invalid credentials are rejected
//! before any service or store access.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use halcyon_types::message::{StoredMessage, Turn};

use crate::http::error::ApiError;
use crate::http::extractors::auth::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SendMessageBody {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "chatHistory", default)]
    pub chat_history: Vec<Turn>,
}

#[derive(Serialize)]
struct HistoryEntry {
    id: String,
    role: String,
    content: String,
    timestamp: String,
}

impl From<StoredMessage> for HistoryEntry {
    fn from(m: StoredMessage) -> Self {
        Self {
            id: m.id.to_string(),
            role: m.role.to_string(),
            content: m.content,
            timestamp: m.timestamp.to_rfc3339(),
        }
    }
}

/// POST /api/v1/chat/message
///
/// Context is assembled from the client-echoed `chatHistory`; the store
/// is only authoritative for durability.
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state
        .chat_service
        .send_message(&user, &body.message, &body.chat_history)
        .await?;

    Ok(Json(json!({
        "success": true,
        "response": outcome.response,
        "timestamp": outcome.timestamp.to_rfc3339(),
    })))
}

/// GET /api/v1/chat/history
pub async fn get_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let messages: Vec<HistoryEntry> = state
        .chat_service
        .history(&user.subject)
        .await?
        .into_iter()
        .map(HistoryEntry::from)
        .collect();

    Ok(Json(json!({
        "success": true,
        "messages": messages,
    })))
}

/// POST /api/v1/chat/clear
pub async fn clear_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Value>, ApiError> {
    state.chat_service.clear_history(&user.subject).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Chat history cleared",
    })))
}
