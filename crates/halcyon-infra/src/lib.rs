//! Infrastructure implementations for Halcyon.
//!
//! Concrete adapters behind the halcyon-core ports: SQLite stores, JWT
//! token verification, the OpenAI-compatible completion engine, the
//! HTTP chat backend for the terminal client, and config loading.

pub mod auth;
pub mod config;
pub mod http_backend;
pub mod llm;
pub mod sqlite;
