//! SQLite-backed store implementations.

pub mod comment;
pub mod conversation;
pub mod pool;
pub mod profile;

pub use comment::SqliteCommentStore;
pub use conversation::SqliteConversationStore;
pub use pool::DatabasePool;
pub use profile::SqliteProfileStore;
