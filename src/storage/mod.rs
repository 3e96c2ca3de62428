/// Storage engine abstraction for the blog
///
/// This module provides the core storage interface and its implementation:
/// - BlogStorage trait: record operations grouped by kind
/// - RocksDB implementation: production storage backend
///
/// Listing operations return records newest first.

pub mod error;
pub mod rocksdb_store;

use crate::types::{
    Comment, Follow, Group, Message, NewComment, NewGroup, NewMessage, NewPost, NewUser, Post,
    PostChanges, RecordId, User,
};
use async_trait::async_trait;
pub use error::{StorageError, StorageResult};
use std::sync::Arc;

/// Blog storage abstraction
///
/// Uniqueness of usernames, group slugs and (user, author) follow pairs is
/// enforced here. Business rules such as rejecting self-follows or checking
/// who may edit a post belong to the callers.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait BlogStorage: Send + Sync {
    // ---- users ----

    /// Create a user
    ///
    /// # Returns
    /// * `Err(StorageError::Conflict)` if the username is taken
    async fn create_user(&self, user: NewUser) -> StorageResult<User>;

    /// Get a user by ID
    async fn get_user(&self, id: RecordId) -> StorageResult<Option<User>>;

    /// Get a user by username
    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;

    /// Scan all users
    async fn scan_users(&self) -> StorageResult<Vec<User>>;

    // ---- groups ----

    /// Create a group
    ///
    /// # Returns
    /// * `Err(StorageError::Conflict)` if the slug is taken
    async fn create_group(&self, group: NewGroup) -> StorageResult<Group>;

    /// Get a group by ID
    async fn get_group(&self, id: RecordId) -> StorageResult<Option<Group>>;

    /// Get a group by slug
    async fn get_group_by_slug(&self, slug: &str) -> StorageResult<Option<Group>>;

    /// Scan all groups, ordered by id
    async fn scan_groups(&self) -> StorageResult<Vec<Group>>;

    // ---- posts ----

    /// Create a post
    async fn create_post(&self, post: NewPost) -> StorageResult<Post>;

    /// Get a post by ID
    async fn get_post(&self, id: RecordId) -> StorageResult<Option<Post>>;

    /// Replace the editable fields of a post
    ///
    /// # Returns
    /// * `Err(StorageError::NotFound)` if the post does not exist
    async fn update_post(&self, id: RecordId, changes: PostChanges) -> StorageResult<Post>;

    /// Delete a post together with its comments
    ///
    /// # Returns
    /// * `Err(StorageError::NotFound)` if the post does not exist
    async fn delete_post(&self, id: RecordId) -> StorageResult<()>;

    /// Scan all posts, newest first
    async fn scan_posts(&self) -> StorageResult<Vec<Post>>;

    /// Posts written by `author`, newest first
    async fn posts_by_author(&self, author: RecordId) -> StorageResult<Vec<Post>>;

    /// Posts published in `group`, newest first
    async fn posts_by_group(&self, group: RecordId) -> StorageResult<Vec<Post>>;

    // ---- comments ----

    /// Create a comment
    ///
    /// # Returns
    /// * `Err(StorageError::NotFound)` if the post does not exist
    async fn create_comment(&self, comment: NewComment) -> StorageResult<Comment>;

    /// Get a comment by ID
    async fn get_comment(&self, id: RecordId) -> StorageResult<Option<Comment>>;

    /// Delete a comment
    ///
    /// # Returns
    /// * `Err(StorageError::NotFound)` if the comment does not exist
    async fn delete_comment(&self, id: RecordId) -> StorageResult<()>;

    /// Comments on `post`, newest first
    async fn comments_for_post(&self, post: RecordId) -> StorageResult<Vec<Comment>>;

    /// Number of comments written by `author`
    async fn count_comments_by_author(&self, author: RecordId) -> StorageResult<usize>;

    // ---- follows ----

    /// Create the edge `user -> author` if absent
    ///
    /// # Returns
    /// * `Ok(true)` if a new edge was stored
    /// * `Ok(false)` if the edge already existed
    async fn follow(&self, user: RecordId, author: RecordId) -> StorageResult<bool>;

    /// Remove the edge `user -> author` if present
    ///
    /// # Returns
    /// * `Ok(true)` if an edge was removed
    async fn unfollow(&self, user: RecordId, author: RecordId) -> StorageResult<bool>;

    /// Get the edge `user -> author`
    async fn get_follow(&self, user: RecordId, author: RecordId) -> StorageResult<Option<Follow>>;

    /// Authors followed by `user`
    async fn following_of(&self, user: RecordId) -> StorageResult<Vec<RecordId>>;

    /// Users following `author`
    async fn followers_of(&self, author: RecordId) -> StorageResult<Vec<RecordId>>;

    // ---- messages ----

    /// Store a message
    async fn create_message(&self, message: NewMessage) -> StorageResult<Message>;

    /// Messages sent by `user`, newest first
    async fn messages_sent_by(&self, user: RecordId) -> StorageResult<Vec<Message>>;

    /// Messages received by `user`, newest first
    async fn messages_received_by(&self, user: RecordId) -> StorageResult<Vec<Message>>;
}

/// Shared storage handle
pub type SharedStorage = Arc<dyn BlogStorage>;
