/// Core record types for the blog store
///
/// Every record is persisted as JSON under its own key and carries a
/// `RecordId` allocated per kind.

pub mod follow;
pub mod group;
pub mod id;
pub mod message;
pub mod post;
pub mod user;

pub use follow::Follow;
pub use group::{Group, NewGroup};
pub use id::{RecordId, RecordIdError};
pub use message::{Message, NewMessage};
pub use post::{Comment, NewComment, NewPost, Post, PostChanges};
pub use user::{NewUser, User};

use chrono::{DateTime, Utc};

/// Records listed newest first
pub trait Chronological {
    fn created_at(&self) -> DateTime<Utc>;
    fn record_id(&self) -> RecordId;
}

/// Sort by creation time descending, newer ids first on equal timestamps
pub fn sort_newest_first<T: Chronological>(records: &mut [T]) {
    records.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.record_id().cmp(&a.record_id()))
    });
}
