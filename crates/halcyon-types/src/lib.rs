//! Shared data types for Halcyon.
//!
//! Plain serde models and error enums used across the workspace.
//! No async, no I/O — those live in halcyon-core and halcyon-infra.

pub mod comment;
pub mod completion;
pub mod config;
pub mod error;
pub mod message;
pub mod user;
