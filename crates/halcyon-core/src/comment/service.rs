//! Comment board service.

use uuid::Uuid;

use halcyon_types::comment::{Comment, NewComment};
use halcyon_types::error::RepositoryError;
use halcyon_types::user::VerifiedUser;

use crate::comment::repository::CommentStore;

/// Maximum number of comments returned by a list.
pub const COMMENT_FETCH_LIMIT: u32 = 100;

/// Errors from comment operations.
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error("comment text is required")]
    EmptyText,

    #[error("comment not found")]
    NotFound,

    #[error("store failure: {0}")]
    Store(RepositoryError),
}

impl From<RepositoryError> for CommentError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => CommentError::NotFound,
            other => CommentError::Store(other),
        }
    }
}

/// Orchestrates the shared comment board.
pub struct CommentService<S>
where
    S: CommentStore,
{
    store: S,
}

impl<S> CommentService<S>
where
    S: CommentStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List comments, newest first.
    pub async fn list(&self) -> Result<Vec<Comment>, CommentError> {
        Ok(self.store.list_comments(COMMENT_FETCH_LIMIT).await?)
    }

    /// Post a comment on behalf of a verified user.
    pub async fn post(&self, user: &VerifiedUser, text: &str) -> Result<Comment, CommentError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CommentError::EmptyText);
        }
        let comment = NewComment {
            text: text.to_string(),
            user_id: user.subject.clone(),
            user_email: user.email.clone(),
            user_name: user
                .email
                .as_deref()
                .and_then(|e| e.split('@').next())
                .unwrap_or("guest")
                .to_string(),
        };
        Ok(self.store.add_comment(&comment).await?)
    }

    /// Toggle the caller's like on a comment.
    pub async fn toggle_like(
        &self,
        user: &VerifiedUser,
        comment_id: Uuid,
    ) -> Result<Comment, CommentError> {
        Ok(self.store.toggle_like(comment_id, &user.subject).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryComments {
        comments: Mutex<Vec<Comment>>,
    }

    impl CommentStore for MemoryComments {
        async fn list_comments(&self, limit: u32) -> Result<Vec<Comment>, RepositoryError> {
            let mut comments = self.comments.lock().unwrap().clone();
            comments.reverse();
            comments.truncate(limit as usize);
            Ok(comments)
        }

        async fn add_comment(&self, comment: &NewComment) -> Result<Comment, RepositoryError> {
            let stored = Comment {
                id: Uuid::now_v7(),
                text: comment.text.clone(),
                user_id: comment.user_id.clone(),
                user_email: comment.user_email.clone(),
                user_name: comment.user_name.clone(),
                timestamp: Utc::now(),
                likes: Vec::new(),
                like_count: 0,
            };
            self.comments.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn toggle_like(
            &self,
            comment_id: Uuid,
            user_id: &str,
        ) -> Result<Comment, RepositoryError> {
            let mut comments = self.comments.lock().unwrap();
            let comment = comments
                .iter_mut()
                .find(|c| c.id == comment_id)
                .ok_or(RepositoryError::NotFound)?;
            if let Some(pos) = comment.likes.iter().position(|u| u == user_id) {
                comment.likes.remove(pos);
            } else {
                comment.likes.push(user_id.to_string());
            }
            comment.like_count = comment.likes.len() as u32;
            Ok(comment.clone())
        }
    }

    fn user(subject: &str) -> VerifiedUser {
        VerifiedUser {
            subject: subject.to_string(),
            email: Some(format!("{subject}@example.com")),
        }
    }

    #[tokio::test]
    async fn test_post_then_list_newest_first() {
        let svc = CommentService::new(MemoryComments::default());
        svc.post(&user("u1"), "first").await.unwrap();
        svc.post(&user("u2"), "second").await.unwrap();

        let comments = svc.list().await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "second");
        assert_eq!(comments[1].user_name, "u1");
    }

    #[tokio::test]
    async fn test_blank_comment_rejected() {
        let svc = CommentService::new(MemoryComments::default());
        let err = svc.post(&user("u1"), "   ").await.unwrap_err();
        assert!(matches!(err, CommentError::EmptyText));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_like_toggles_on_and_off() {
        let svc = CommentService::new(MemoryComments::default());
        let posted = svc.post(&user("u1"), "nice shot").await.unwrap();

        let liked = svc.toggle_like(&user("u2"), posted.id).await.unwrap();
        assert_eq!(liked.like_count, 1);
        assert_eq!(liked.likes, vec!["u2".to_string()]);

        let unliked = svc.toggle_like(&user("u2"), posted.id).await.unwrap();
        assert_eq!(unliked.like_count, 0);
        assert!(unliked.likes.is_empty());
    }

    #[tokio::test]
    async fn test_like_unknown_comment_is_not_found() {
        let svc = CommentService::new(MemoryComments::default());
        let err = svc
            .toggle_like(&user("u1"), Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, CommentError::NotFound));
    }
}
