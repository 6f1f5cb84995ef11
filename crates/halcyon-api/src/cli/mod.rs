//! Terminal client commands.

pub mod chat;
