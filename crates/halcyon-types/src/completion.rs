//! Completion engine request/response types.
//!
//! The completion engine receives an ordered, role-tagged message list
//! (persona first) and returns one generated reply. Streaming is out of
//! scope; the engine surface is a single request/response call.

use serde::{Deserialize, Serialize};

use crate::message::Turn;

/// Request to the completion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    /// Ordered message list: persona, trimmed history, new user message.
    pub messages: Vec<Turn>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
}

impl CompletionRequest {
    /// Default generation limit per reply.
    pub const DEFAULT_MAX_TOKENS: u32 = 500;
    /// Default sampling temperature.
    pub const DEFAULT_TEMPERATURE: f64 = 0.7;
    /// Default presence penalty.
    pub const DEFAULT_PRESENCE_PENALTY: f64 = 0.6;
    /// Default frequency penalty.
    pub const DEFAULT_FREQUENCY_PENALTY: f64 = 0.3;

    /// Build a request with the concierge defaults for the given model.
    pub fn with_defaults(model: impl Into<String>, messages: Vec<Turn>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            temperature: Some(Self::DEFAULT_TEMPERATURE),
            presence_penalty: Some(Self::DEFAULT_PRESENCE_PENALTY),
            frequency_penalty: Some(Self::DEFAULT_FREQUENCY_PENALTY),
        }
    }
}

/// Response from the completion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Provider-assigned response id.
    pub id: String,
    /// Generated reply text. May be empty; callers treat an empty reply
    /// as an upstream failure.
    pub content: String,
    /// Model that produced the reply.
    pub model: String,
}

/// Errors from completion engine operations.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("provider error: {0}")]
    Provider(String),

    #[error("authentication with provider failed")]
    AuthenticationFailed,

    #[error("provider returned an empty reply")]
    EmptyReply,

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
