//! JWT-backed implementation of `TokenVerifier`.
//!
//! Production deployments verify RS256 signatures against the identity
//! provider's public key. The HS256 constructor exists for local
//! development and tests, keyed from `HALCYON_AUTH_SECRET`.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use halcyon_core::auth::verifier::TokenVerifier;
use halcyon_types::user::{AuthError, VerifiedUser};

/// Claims Halcyon reads from a bearer token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: u64,
    #[serde(default)]
    email: Option<String>,
}

/// Verifies bearer JWTs against a configured key and issuer/audience.
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// RS256 verifier from a PEM-encoded public key.
    pub fn rs256_from_pem(
        pem: &[u8],
        issuer: Option<&str>,
        audience: Option<&str>,
    ) -> Result<Self, AuthError> {
        let decoding_key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| AuthError::InvalidToken(format!("bad public key: {e}")))?;
        Ok(Self {
            decoding_key,
            validation: build_validation(Algorithm::RS256, issuer, audience),
        })
    }

    /// HS256 verifier from a shared secret. Development and tests only.
    pub fn hs256(secret: &[u8], issuer: Option<&str>, audience: Option<&str>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: build_validation(Algorithm::HS256, issuer, audience),
        }
    }
}

fn build_validation(
    algorithm: Algorithm,
    issuer: Option<&str>,
    audience: Option<&str>,
) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = true;
    if let Some(issuer) = issuer {
        validation.set_issuer(&[issuer]);
    }
    if let Some(audience) = audience {
        validation.set_audience(&[audience]);
    } else {
        validation.validate_aud = false;
    }
    validation
}

impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(VerifiedUser {
            subject: data.claims.sub,
            email: data.claims.email,
        })
    }
}
