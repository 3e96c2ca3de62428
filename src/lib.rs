/// Yatube Store
///
/// Persistent storage for the Yatube social blogging service.
///
/// # Architecture
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │           Yatube Store                           │
/// ├──────────────────────────────────────────────────┤
/// │  ┌────────────────────────────────┐              │
/// │  │   Records (users, groups,      │              │
/// │  │   posts, comments, follows,    │              │
/// │  │   messages)                    │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   BlogStorage trait            │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   Storage Engine (RocksDB)     │              │
/// │  └────────────────────────────────┘              │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// # Modules
///
/// - `types`: Record types and ids
/// - `storage`: Storage abstraction and RocksDB implementation

pub mod storage;
pub mod types;

// Re-export commonly used types
pub use types::{
    sort_newest_first, Chronological, Comment, Follow, Group, Message, NewComment, NewGroup,
    NewMessage, NewPost, NewUser, Post, PostChanges, RecordId, RecordIdError, User,
};

// Re-export storage types
pub use storage::{BlogStorage, SharedStorage, StorageError, StorageResult};

#[cfg(feature = "mock")]
pub use storage::MockBlogStorage;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
