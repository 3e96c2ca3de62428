/// RocksDB storage implementation
///
/// Key space design (`{ns}` is the store namespace, ids are zero-padded):
/// - Counter:          c:{ns}:{kind} → last allocated id (u64 LE)
/// - User:             u:{ns}:{id} → JSON
/// - Username index:   un:{ns}:{username} → id
/// - Group:            g:{ns}:{id} → JSON
/// - Slug index:       gs:{ns}:{slug} → id
/// - Post:             p:{ns}:{id} → JSON
/// - Author posts:     pa:{ns}:{author}:{post} → empty
/// - Group posts:      pg:{ns}:{group}:{post} → empty
/// - Comment:          k:{ns}:{id} → JSON
/// - Post comments:    kp:{ns}:{post}:{comment} → empty
/// - Author comments:  ka:{ns}:{author}:{comment} → empty
/// - Follow:           f:{ns}:{user}:{author} → JSON
/// - Follower index:   fr:{ns}:{author}:{user} → empty
/// - Message:          m:{ns}:{id} → JSON
/// - Sent index:       ms:{ns}:{author}:{message} → empty
/// - Received index:   mr:{ns}:{user}:{message} → empty
///
/// A record and its index entries are always written in one `WriteBatch`.

use super::error::{StorageError, StorageResult};
use super::BlogStorage;
use crate::types::{
    sort_newest_first, Comment, Follow, Group, Message, NewComment, NewGroup, NewMessage,
    NewPost, NewUser, Post, PostChanges, RecordId, User,
};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rocksdb::{Options, WriteBatch, DB};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

const USER: &str = "user";
const GROUP: &str = "group";
const POST: &str = "post";
const COMMENT: &str = "comment";
const MESSAGE: &str = "message";

/// RocksDB-backed blog storage
pub struct RocksDbStorage {
    /// RocksDB database instance
    db: Arc<DB>,

    /// Key namespace
    namespace: String,

    /// Serializes id allocation and check-then-write sequences
    write_lock: Mutex<()>,
}

impl RocksDbStorage {
    /// Create a new RocksDB storage instance
    ///
    /// # Arguments
    /// * `path` - Path to the database directory
    /// * `namespace` - Key namespace, allowing several stores in one database
    pub fn new<P: AsRef<Path>>(path: P, namespace: impl Into<String>) -> StorageResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path)?;
        let namespace = namespace.into();

        tracing::debug!(namespace = %namespace, "opened blog store");

        Ok(Self {
            db: Arc::new(db),
            namespace,
            write_lock: Mutex::new(()),
        })
    }

    /// Make key for a counter
    fn make_counter_key(&self, kind: &str) -> String {
        format!("c:{}:{}", self.namespace, kind)
    }

    /// Make key for a record of the given tag
    fn make_record_key(&self, tag: &str, id: RecordId) -> String {
        format!("{}:{}:{}", tag, self.namespace, id.to_key())
    }

    /// Make key prefix for scanning all records of a tag
    fn make_record_prefix(&self, tag: &str) -> String {
        format!("{}:{}:", tag, self.namespace)
    }

    /// Make key for a unique-field index (username, slug)
    fn make_unique_key(&self, tag: &str, value: &str) -> String {
        format!("{}:{}:{}", tag, self.namespace, value)
    }

    /// Make key for a pair index entry: {tag}:{ns}:{owner}:{member}
    fn make_pair_key(&self, tag: &str, owner: RecordId, member: RecordId) -> String {
        format!("{}:{}:{}:{}", tag, self.namespace, owner.to_key(), member.to_key())
    }

    /// Make key prefix for the members of a pair index
    fn make_pair_prefix(&self, tag: &str, owner: RecordId) -> String {
        format!("{}:{}:{}:", tag, self.namespace, owner.to_key())
    }

    /// Allocate the next id of `kind`, staging the counter update in `batch`
    ///
    /// Callers must hold `write_lock` until the batch is written.
    fn next_id(&self, batch: &mut WriteBatch, kind: &str) -> StorageResult<RecordId> {
        let key = self.make_counter_key(kind);

        let current = match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| StorageError::CorruptIndex(key.clone()))?;
                u64::from_le_bytes(raw)
            }
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| StorageError::CounterOverflow(kind.to_string()))?;

        batch.put(key.as_bytes(), next.to_le_bytes());

        Ok(RecordId::from_raw(next))
    }

    /// Read and deserialize a JSON value
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Stage a JSON value in `batch`
    fn put_json<T: Serialize>(&self, batch: &mut WriteBatch, key: &str, value: &T) -> StorageResult<()> {
        batch.put(key.as_bytes(), serde_json::to_vec(value)?);
        Ok(())
    }

    /// Deserialize every value under `prefix`, in key order
    fn scan_json<T: DeserializeOwned>(&self, prefix: &str) -> StorageResult<Vec<T>> {
        let mut values = Vec::new();
        let iter = self.db.prefix_iterator(prefix.as_bytes());

        for item in iter {
            let (key, value) = item?;

            // Check if key still matches prefix
            if !key.starts_with(prefix.as_bytes()) {
                break;
            }

            values.push(serde_json::from_slice(&value)?);
        }

        Ok(values)
    }

    /// Collect the member ids of a pair index, in id order
    fn scan_index(&self, prefix: &str) -> StorageResult<Vec<RecordId>> {
        let mut ids = Vec::new();
        let iter = self.db.prefix_iterator(prefix.as_bytes());

        for item in iter {
            let (key, _value) = item?;
            let key_str = std::str::from_utf8(&key)?;

            // Check if key still matches prefix
            if !key_str.starts_with(prefix) {
                break;
            }

            // Member id is the last segment: {tag}:{ns}:{owner}:{member}
            let member = key_str
                .rsplit(':')
                .next()
                .and_then(|raw| raw.parse::<u64>().ok())
                .ok_or_else(|| StorageError::CorruptIndex(key_str.to_string()))?;

            ids.push(RecordId::from_raw(member));
        }

        Ok(ids)
    }

    /// Count the entries of a pair index
    fn count_index(&self, prefix: &str) -> StorageResult<usize> {
        let mut count = 0;
        let iter = self.db.prefix_iterator(prefix.as_bytes());

        for item in iter {
            let (key, _value) = item?;
            if !key.starts_with(prefix.as_bytes()) {
                break;
            }
            count += 1;
        }

        Ok(count)
    }

    /// Resolve a unique-field index entry to a record
    fn lookup_unique<T: DeserializeOwned>(
        &self,
        index_tag: &str,
        record_tag: &str,
        value: &str,
    ) -> StorageResult<Option<T>> {
        let key = self.make_unique_key(index_tag, value);

        let raw = match self.db.get(key.as_bytes())? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        let id = std::str::from_utf8(&raw)?
            .parse::<u64>()
            .map_err(|_| StorageError::CorruptIndex(key.clone()))?;

        self.get_json(&self.make_record_key(record_tag, RecordId::from_raw(id)))
    }

    /// Load the records referenced by an index, skipping dangling entries
    fn load_records<T: DeserializeOwned>(&self, tag: &str, ids: Vec<RecordId>) -> StorageResult<Vec<T>> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.get_json(&self.make_record_key(tag, id))? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Stage the removal of a comment and its index entries
    fn stage_comment_delete(&self, batch: &mut WriteBatch, comment: &Comment) {
        batch.delete(self.make_record_key("k", comment.id).as_bytes());
        batch.delete(self.make_pair_key("kp", comment.post, comment.id).as_bytes());
        batch.delete(self.make_pair_key("ka", comment.author, comment.id).as_bytes());
    }
}

#[async_trait]
impl BlogStorage for RocksDbStorage {
    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let _guard = self.write_lock.lock();

        let unique_key = self.make_unique_key("un", &user.username);
        if self.db.get(unique_key.as_bytes())?.is_some() {
            return Err(StorageError::conflict(USER, &user.username));
        }

        let mut batch = WriteBatch::default();
        let id = self.next_id(&mut batch, USER)?;

        let record = User {
            id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: Utc::now(),
        };

        self.put_json(&mut batch, &self.make_record_key("u", id), &record)?;
        batch.put(unique_key.as_bytes(), id.as_raw().to_string().as_bytes());
        self.db.write(batch)?;

        tracing::debug!(user_id = %id, username = %record.username, "stored user");

        Ok(record)
    }

    async fn get_user(&self, id: RecordId) -> StorageResult<Option<User>> {
        self.get_json(&self.make_record_key("u", id))
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        self.lookup_unique("un", "u", username)
    }

    async fn scan_users(&self) -> StorageResult<Vec<User>> {
        self.scan_json(&self.make_record_prefix("u"))
    }

    async fn create_group(&self, group: NewGroup) -> StorageResult<Group> {
        let _guard = self.write_lock.lock();

        let unique_key = self.make_unique_key("gs", &group.slug);
        if self.db.get(unique_key.as_bytes())?.is_some() {
            return Err(StorageError::conflict(GROUP, &group.slug));
        }

        let mut batch = WriteBatch::default();
        let id = self.next_id(&mut batch, GROUP)?;

        let record = Group {
            id,
            title: group.title,
            slug: group.slug,
            description: group.description,
        };

        self.put_json(&mut batch, &self.make_record_key("g", id), &record)?;
        batch.put(unique_key.as_bytes(), id.as_raw().to_string().as_bytes());
        self.db.write(batch)?;

        tracing::debug!(group_id = %id, slug = %record.slug, "stored group");

        Ok(record)
    }

    async fn get_group(&self, id: RecordId) -> StorageResult<Option<Group>> {
        self.get_json(&self.make_record_key("g", id))
    }

    async fn get_group_by_slug(&self, slug: &str) -> StorageResult<Option<Group>> {
        self.lookup_unique("gs", "g", slug)
    }

    async fn scan_groups(&self) -> StorageResult<Vec<Group>> {
        self.scan_json(&self.make_record_prefix("g"))
    }

    async fn create_post(&self, post: NewPost) -> StorageResult<Post> {
        let _guard = self.write_lock.lock();

        let mut batch = WriteBatch::default();
        let id = self.next_id(&mut batch, POST)?;

        let record = Post {
            id,
            text: post.text,
            author: post.author,
            group: post.group,
            image: post.image,
            created_at: Utc::now(),
        };

        self.put_json(&mut batch, &self.make_record_key("p", id), &record)?;
        batch.put(self.make_pair_key("pa", record.author, id).as_bytes(), b"");
        if let Some(group) = record.group {
            batch.put(self.make_pair_key("pg", group, id).as_bytes(), b"");
        }
        self.db.write(batch)?;

        tracing::debug!(post_id = %id, author = %record.author, "stored post");

        Ok(record)
    }

    async fn get_post(&self, id: RecordId) -> StorageResult<Option<Post>> {
        self.get_json(&self.make_record_key("p", id))
    }

    async fn update_post(&self, id: RecordId, changes: PostChanges) -> StorageResult<Post> {
        let _guard = self.write_lock.lock();

        let key = self.make_record_key("p", id);
        let mut post: Post = self
            .get_json(&key)?
            .ok_or_else(|| StorageError::not_found(POST, id))?;

        let mut batch = WriteBatch::default();

        if post.group != changes.group {
            if let Some(old) = post.group {
                batch.delete(self.make_pair_key("pg", old, id).as_bytes());
            }
            if let Some(new) = changes.group {
                batch.put(self.make_pair_key("pg", new, id).as_bytes(), b"");
            }
        }

        post.text = changes.text;
        post.group = changes.group;
        post.image = changes.image;

        self.put_json(&mut batch, &key, &post)?;
        self.db.write(batch)?;

        Ok(post)
    }

    async fn delete_post(&self, id: RecordId) -> StorageResult<()> {
        let _guard = self.write_lock.lock();

        let key = self.make_record_key("p", id);
        let post: Post = self
            .get_json(&key)?
            .ok_or_else(|| StorageError::not_found(POST, id))?;

        let mut batch = WriteBatch::default();

        // Comments go with the post
        let comment_ids = self.scan_index(&self.make_pair_prefix("kp", id))?;
        let comments: Vec<Comment> = self.load_records("k", comment_ids)?;
        for comment in &comments {
            self.stage_comment_delete(&mut batch, comment);
        }

        batch.delete(key.as_bytes());
        batch.delete(self.make_pair_key("pa", post.author, id).as_bytes());
        if let Some(group) = post.group {
            batch.delete(self.make_pair_key("pg", group, id).as_bytes());
        }
        self.db.write(batch)?;

        tracing::debug!(post_id = %id, comments = comments.len(), "deleted post");

        Ok(())
    }

    async fn scan_posts(&self) -> StorageResult<Vec<Post>> {
        let mut posts: Vec<Post> = self.scan_json(&self.make_record_prefix("p"))?;
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn posts_by_author(&self, author: RecordId) -> StorageResult<Vec<Post>> {
        let ids = self.scan_index(&self.make_pair_prefix("pa", author))?;
        let mut posts: Vec<Post> = self.load_records("p", ids)?;
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn posts_by_group(&self, group: RecordId) -> StorageResult<Vec<Post>> {
        let ids = self.scan_index(&self.make_pair_prefix("pg", group))?;
        let mut posts: Vec<Post> = self.load_records("p", ids)?;
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn create_comment(&self, comment: NewComment) -> StorageResult<Comment> {
        let _guard = self.write_lock.lock();

        if self.db.get(self.make_record_key("p", comment.post).as_bytes())?.is_none() {
            return Err(StorageError::not_found(POST, comment.post));
        }

        let mut batch = WriteBatch::default();
        let id = self.next_id(&mut batch, COMMENT)?;

        let record = Comment {
            id,
            post: comment.post,
            author: comment.author,
            text: comment.text,
            created_at: Utc::now(),
        };

        self.put_json(&mut batch, &self.make_record_key("k", id), &record)?;
        batch.put(self.make_pair_key("kp", record.post, id).as_bytes(), b"");
        batch.put(self.make_pair_key("ka", record.author, id).as_bytes(), b"");
        self.db.write(batch)?;

        Ok(record)
    }

    async fn get_comment(&self, id: RecordId) -> StorageResult<Option<Comment>> {
        self.get_json(&self.make_record_key("k", id))
    }

    async fn delete_comment(&self, id: RecordId) -> StorageResult<()> {
        let _guard = self.write_lock.lock();

        let comment: Comment = self
            .get_json(&self.make_record_key("k", id))?
            .ok_or_else(|| StorageError::not_found(COMMENT, id))?;

        let mut batch = WriteBatch::default();
        self.stage_comment_delete(&mut batch, &comment);
        self.db.write(batch)?;

        Ok(())
    }

    async fn comments_for_post(&self, post: RecordId) -> StorageResult<Vec<Comment>> {
        let ids = self.scan_index(&self.make_pair_prefix("kp", post))?;
        let mut comments: Vec<Comment> = self.load_records("k", ids)?;
        sort_newest_first(&mut comments);
        Ok(comments)
    }

    async fn count_comments_by_author(&self, author: RecordId) -> StorageResult<usize> {
        self.count_index(&self.make_pair_prefix("ka", author))
    }

    async fn follow(&self, user: RecordId, author: RecordId) -> StorageResult<bool> {
        let _guard = self.write_lock.lock();

        let key = self.make_pair_key("f", user, author);
        if self.db.get(key.as_bytes())?.is_some() {
            return Ok(false);
        }

        let edge = Follow {
            user,
            author,
            created_at: Utc::now(),
        };

        let mut batch = WriteBatch::default();
        self.put_json(&mut batch, &key, &edge)?;
        batch.put(self.make_pair_key("fr", author, user).as_bytes(), b"");
        self.db.write(batch)?;

        Ok(true)
    }

    async fn unfollow(&self, user: RecordId, author: RecordId) -> StorageResult<bool> {
        let _guard = self.write_lock.lock();

        let key = self.make_pair_key("f", user, author);
        if self.db.get(key.as_bytes())?.is_none() {
            return Ok(false);
        }

        let mut batch = WriteBatch::default();
        batch.delete(key.as_bytes());
        batch.delete(self.make_pair_key("fr", author, user).as_bytes());
        self.db.write(batch)?;

        Ok(true)
    }

    async fn get_follow(&self, user: RecordId, author: RecordId) -> StorageResult<Option<Follow>> {
        self.get_json(&self.make_pair_key("f", user, author))
    }

    async fn following_of(&self, user: RecordId) -> StorageResult<Vec<RecordId>> {
        self.scan_index(&self.make_pair_prefix("f", user))
    }

    async fn followers_of(&self, author: RecordId) -> StorageResult<Vec<RecordId>> {
        self.scan_index(&self.make_pair_prefix("fr", author))
    }

    async fn create_message(&self, message: NewMessage) -> StorageResult<Message> {
        let _guard = self.write_lock.lock();

        let mut batch = WriteBatch::default();
        let id = self.next_id(&mut batch, MESSAGE)?;

        let record = Message {
            id,
            text: message.text,
            author: message.author,
            user: message.user,
            image: message.image,
            created_at: Utc::now(),
        };

        self.put_json(&mut batch, &self.make_record_key("m", id), &record)?;
        batch.put(self.make_pair_key("ms", record.author, id).as_bytes(), b"");
        batch.put(self.make_pair_key("mr", record.user, id).as_bytes(), b"");
        self.db.write(batch)?;

        Ok(record)
    }

    async fn messages_sent_by(&self, user: RecordId) -> StorageResult<Vec<Message>> {
        let ids = self.scan_index(&self.make_pair_prefix("ms", user))?;
        let mut messages: Vec<Message> = self.load_records("m", ids)?;
        sort_newest_first(&mut messages);
        Ok(messages)
    }

    async fn messages_received_by(&self, user: RecordId) -> StorageResult<Vec<Message>> {
        let ids = self.scan_index(&self.make_pair_prefix("mr", user))?;
        let mut messages: Vec<Message> = self.load_records("m", ids)?;
        sort_newest_first(&mut messages);
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_storage() -> (RocksDbStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = RocksDbStorage::new(temp_dir.path(), "test_blog").unwrap();
        (storage, temp_dir)
    }

    async fn create_user(storage: &RocksDbStorage, username: &str) -> User {
        storage.create_user(NewUser::named(username)).await.unwrap()
    }

    async fn create_post(storage: &RocksDbStorage, author: RecordId, group: Option<RecordId>) -> Post {
        storage
            .create_post(NewPost {
                text: "text".to_string(),
                author,
                group,
                image: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let (storage, _temp) = create_test_storage().await;

        let user = create_user(&storage, "leo").await;
        assert_eq!(user.id.as_raw(), 1);

        let by_id = storage.get_user(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "leo");

        let by_name = storage.get_user_by_username("leo").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);

        assert!(storage.get_user_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let (storage, _temp) = create_test_storage().await;

        create_user(&storage, "leo").await;
        let result = storage.create_user(NewUser::named("leo")).await;

        assert!(matches!(result, Err(StorageError::Conflict { kind: "user", .. })));
        assert_eq!(storage.scan_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_group_slug_is_unique() {
        let (storage, _temp) = create_test_storage().await;

        let group = storage
            .create_group(NewGroup {
                title: "Cats".to_string(),
                slug: "cats".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();

        let found = storage.get_group_by_slug("cats").await.unwrap().unwrap();
        assert_eq!(found, group);

        let again = storage
            .create_group(NewGroup {
                title: "Other cats".to_string(),
                slug: "cats".to_string(),
                description: String::new(),
            })
            .await;
        assert!(again.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_posts_by_author_and_group() {
        let (storage, _temp) = create_test_storage().await;

        let leo = create_user(&storage, "leo").await;
        let anna = create_user(&storage, "anna").await;
        let group = storage
            .create_group(NewGroup {
                title: "Novels".to_string(),
                slug: "novels".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();

        let first = create_post(&storage, leo.id, Some(group.id)).await;
        let second = create_post(&storage, leo.id, None).await;
        let third = create_post(&storage, anna.id, Some(group.id)).await;

        let leo_posts = storage.posts_by_author(leo.id).await.unwrap();
        let ids: Vec<RecordId> = leo_posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let group_posts = storage.posts_by_group(group.id).await.unwrap();
        let ids: Vec<RecordId> = group_posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![third.id, first.id]);

        assert_eq!(storage.scan_posts().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_post_moves_group_index() {
        let (storage, _temp) = create_test_storage().await;

        let leo = create_user(&storage, "leo").await;
        let group = storage
            .create_group(NewGroup {
                title: "Novels".to_string(),
                slug: "novels".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        let post = create_post(&storage, leo.id, Some(group.id)).await;

        let updated = storage
            .update_post(
                post.id,
                PostChanges {
                    text: "edited".to_string(),
                    group: None,
                    image: Some("posts/cover.png".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.text, "edited");
        assert_eq!(updated.created_at, post.created_at);
        assert!(storage.posts_by_group(group.id).await.unwrap().is_empty());

        let missing = storage
            .update_post(
                RecordId::from_raw(99),
                PostChanges {
                    text: "x".to_string(),
                    group: None,
                    image: None,
                },
            )
            .await;
        assert!(matches!(missing, Err(StorageError::NotFound { kind: "post", .. })));
    }

    #[tokio::test]
    async fn test_delete_post_removes_comments() {
        let (storage, _temp) = create_test_storage().await;

        let leo = create_user(&storage, "leo").await;
        let anna = create_user(&storage, "anna").await;
        let post = create_post(&storage, leo.id, None).await;

        let comment = storage
            .create_comment(NewComment {
                post: post.id,
                author: anna.id,
                text: "nice".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(storage.count_comments_by_author(anna.id).await.unwrap(), 1);

        storage.delete_post(post.id).await.unwrap();

        assert!(storage.get_post(post.id).await.unwrap().is_none());
        assert!(storage.get_comment(comment.id).await.unwrap().is_none());
        assert!(storage.posts_by_author(leo.id).await.unwrap().is_empty());
        assert_eq!(storage.count_comments_by_author(anna.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_comment_on_missing_post_fails() {
        let (storage, _temp) = create_test_storage().await;
        let leo = create_user(&storage, "leo").await;

        let result = storage
            .create_comment(NewComment {
                post: RecordId::from_raw(7),
                author: leo.id,
                text: "hello?".to_string(),
            })
            .await;

        assert!(matches!(result, Err(StorageError::NotFound { kind: "post", .. })));
    }

    #[tokio::test]
    async fn test_follow_is_idempotent() {
        let (storage, _temp) = create_test_storage().await;

        let leo = create_user(&storage, "leo").await;
        let anna = create_user(&storage, "anna").await;

        assert!(storage.follow(leo.id, anna.id).await.unwrap());
        assert!(!storage.follow(leo.id, anna.id).await.unwrap());

        assert_eq!(storage.following_of(leo.id).await.unwrap(), vec![anna.id]);
        assert_eq!(storage.followers_of(anna.id).await.unwrap(), vec![leo.id]);
        assert!(storage.following_of(anna.id).await.unwrap().is_empty());

        assert!(storage.unfollow(leo.id, anna.id).await.unwrap());
        assert!(!storage.unfollow(leo.id, anna.id).await.unwrap());
        assert!(storage.get_follow(leo.id, anna.id).await.unwrap().is_none());
        assert!(storage.followers_of(anna.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_message_indexes() {
        let (storage, _temp) = create_test_storage().await;

        let leo = create_user(&storage, "leo").await;
        let anna = create_user(&storage, "anna").await;

        let message = storage
            .create_message(NewMessage {
                text: "hello".to_string(),
                author: leo.id,
                user: anna.id,
                image: None,
            })
            .await
            .unwrap();

        assert_eq!(storage.messages_sent_by(leo.id).await.unwrap(), vec![message.clone()]);
        assert_eq!(storage.messages_received_by(anna.id).await.unwrap(), vec![message]);
        assert!(storage.messages_received_by(leo.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_with_shared_prefix_do_not_mix() {
        let (storage, _temp) = create_test_storage().await;

        let users: Vec<User> = {
            let mut users = Vec::new();
            for i in 0..12 {
                users.push(create_user(&storage, &format!("user{}", i)).await);
            }
            users
        };

        // user 1 and user 12 share a decimal prefix
        create_post(&storage, users[0].id, None).await;
        create_post(&storage, users[11].id, None).await;

        assert_eq!(storage.posts_by_author(users[0].id).await.unwrap().len(), 1);
        assert_eq!(storage.posts_by_author(users[11].id).await.unwrap().len(), 1);
    }
}
