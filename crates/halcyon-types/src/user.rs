//! Verified identity and profile types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity bound from a verified bearer credential.
///
/// The subject is an opaque string used as the partition key for the
/// caller's conversation and profile. Nothing else is modeled from the
/// credential beyond the optional email claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub subject: String,
    pub email: Option<String>,
}

/// Per-user profile record, upserted non-destructively on chat activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub email: Option<String>,
    pub last_chat_activity: DateTime<Utc>,
}

/// Errors from bearer credential verification.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error("malformed authorization header")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::MissingCredential.to_string(),
            "missing bearer credential"
        );
        assert!(AuthError::InvalidToken("bad signature".to_string())
            .to_string()
            .contains("bad signature"));
    }

    #[test]
    fn test_verified_user_serde() {
        let user = VerifiedUser {
            subject: "u1".to_string(),
            email: Some("u1@example.com".to_string()),
        };
        let json = serde_json::to_string(&user).unwrap();
        let parsed: VerifiedUser = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}
