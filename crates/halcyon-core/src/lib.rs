//! Business logic and store trait definitions for Halcyon.
//!
//! This crate defines the "ports" (store, verifier, and engine traits)
//! that the infrastructure layer implements. It depends only on
//! `halcyon-types` -- never on `halcyon-infra` or any database/IO crate.

pub mod auth;
pub mod chat;
pub mod comment;
pub mod llm;
pub mod persona;
