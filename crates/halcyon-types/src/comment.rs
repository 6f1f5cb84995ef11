//! Comment board types.
//!
//! Comments form a flat collection; likes are a set of user ids per
//! comment with a derived count.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted comment with its like state.
///
/// Serializes with camelCase field names to match the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub user_id: String,
    pub user_email: Option<String>,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
    /// User ids that have liked this comment.
    pub likes: Vec<String>,
    /// Derived from `likes`; stored reads recompute it with a COUNT.
    pub like_count: u32,
}

/// Input for posting a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub user_id: String,
    pub user_email: Option<String>,
    pub user_name: String,
}
