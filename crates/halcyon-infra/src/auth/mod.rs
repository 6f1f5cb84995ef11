//! Token verification implementations.

pub mod jwt;

pub use jwt::JwtVerifier;
