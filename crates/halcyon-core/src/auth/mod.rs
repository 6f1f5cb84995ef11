//! Identity verification port.

pub mod verifier;

pub use verifier::TokenVerifier;
