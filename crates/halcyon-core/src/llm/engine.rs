//! CompletionEngine trait definition.
//!
//! The completion model is external: given an ordered list of role-tagged
//! messages it returns one generated reply. No streaming, no retry policy.
//! Implementations live in halcyon-infra (e.g., `OpenAiCompatEngine`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use halcyon_types::completion::{CompletionError, CompletionRequest, CompletionResponse};

/// Trait for completion engine backends.
pub trait CompletionEngine: Send + Sync {
    /// Human-readable engine name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full reply.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, CompletionError>> + Send;
}
