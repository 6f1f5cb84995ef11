//! Context window assembly for the completion engine.
//!
//! Builds the bounded message list sent upstream: one leading system
//! persona message, the most recent history entries, and the new user
//! message. The window is capped by entry count only; there is no
//! token-budget accounting (a known limitation of this design).

use halcyon_types::message::Turn;

/// How many history entries are carried into the context window.
pub const HISTORY_WINDOW: usize = 10;

/// Assemble the context window for one exchange.
///
/// Returns `[persona] + last min(HISTORY_WINDOW, len) history entries +
/// [new user message]` -- at most `HISTORY_WINDOW + 2` entries. History
/// may contain arbitrary role sequences; entries are carried through
/// unchanged (role and content only). Pure function, always succeeds.
pub fn assemble(persona: &str, history: &[Turn], new_message: &str) -> Vec<Turn> {
    let mut messages = Vec::with_capacity(HISTORY_WINDOW + 2);

    messages.push(Turn::system(persona));

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    messages.extend(history[start..].iter().cloned());

    messages.push(Turn::user(new_message));
    messages
}
