//! CommentStore trait definition.

use uuid::Uuid;

use halcyon_types::comment::{Comment, NewComment};
use halcyon_types::error::RepositoryError;

/// Shared comment board with per-user like toggles. Implementations
/// live in halcyon-infra.
pub trait CommentStore: Send + Sync {
    /// List comments, newest first.
    fn list_comments(
        &self,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Comment>, RepositoryError>> + Send;

    /// Post a comment and return it as stored.
    fn add_comment(
        &self,
        comment: &NewComment,
    ) -> impl std::future::Future<Output = Result<Comment, RepositoryError>> + Send;

    /// Toggle one user's like on a comment; returns the updated comment.
    fn toggle_like(
        &self,
        comment_id: Uuid,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Comment, RepositoryError>> + Send;
}
