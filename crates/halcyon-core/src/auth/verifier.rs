//! TokenVerifier trait definition.
//!
//! The identity provider is external: it issues bearer credentials and,
//! given one, deterministically returns the owning identity or fails.
//! Implementations live in halcyon-infra (e.g., `JwtVerifier`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use halcyon_types::user::{AuthError, VerifiedUser};

/// Verifies a bearer credential and yields the owning identity.
pub trait TokenVerifier: Send + Sync {
    /// Verify a raw bearer token. Invalid or expired tokens fail with
    /// [`AuthError`]; no partial identity is ever produced.
    fn verify(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<VerifiedUser, AuthError>> + Send;
}
