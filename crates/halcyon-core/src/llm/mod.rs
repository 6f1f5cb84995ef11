//! Completion engine port.

pub mod engine;

pub use engine::CompletionEngine;
