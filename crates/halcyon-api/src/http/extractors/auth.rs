//! Bearer credential authentication extractor.
//!
//! Extracts `Authorization: Bearer <token>` and verifies it with the
//! configured token verifier. A missing or malformed header is rejected
//! before any verification or store access happens.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use halcyon_core::auth::verifier::TokenVerifier;
use halcyon_types::user::{AuthError, VerifiedUser};

use crate::http::error::ApiError;
use crate::state::AppState;

/// Authenticated request identity. Extracting this verifies the bearer
/// credential.
pub struct AuthUser(pub VerifiedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(parts)?;
        let user = state.verifier.verify(&token).await?;
        Ok(AuthUser(user))
    }
}

/// Extract the bearer token from the Authorization header.
fn extract_bearer(parts: &Parts) -> Result<String, AuthError> {
    let header = parts
        .headers
        .get("authorization")
        .ok_or(AuthError::MissingCredential)?;
    let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token.to_string())
}
