//! Store-level integration tests
//!
//! Exercises the RocksDB store through the `BlogStorage` trait object the
//! way the web service uses it.

use std::sync::Arc;
use tempfile::TempDir;
use yatube_store::storage::rocksdb_store::RocksDbStorage;
use yatube_store::{NewMessage, NewPost, NewUser, SharedStorage};

fn open(temp_dir: &TempDir) -> SharedStorage {
    Arc::new(RocksDbStorage::new(temp_dir.path(), "integration").unwrap())
}

/// Concurrent follow requests for one pair store exactly one edge
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_follow_creates_single_edge() {
    let temp_dir = TempDir::new().unwrap();
    let storage = open(&temp_dir);

    let reader = storage.create_user(NewUser::named("reader")).await.unwrap();
    let writer = storage.create_user(NewUser::named("writer")).await.unwrap();

    let (reader_id, writer_id) = (reader.id, writer.id);
    let mut handles = Vec::new();
    for _ in 0..16 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage.follow(reader_id, writer_id).await.unwrap()
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap() {
            created += 1;
        }
    }

    assert_eq!(created, 1, "exactly one call should create the edge");
    assert_eq!(storage.following_of(reader.id).await.unwrap(), vec![writer.id]);
    assert_eq!(storage.followers_of(writer.id).await.unwrap(), vec![reader.id]);
}

/// Records and counters survive reopening the database
#[tokio::test]
async fn test_reopen_keeps_records_and_counters() {
    let temp_dir = TempDir::new().unwrap();

    let first_post = {
        let storage = open(&temp_dir);
        let author = storage.create_user(NewUser::named("author")).await.unwrap();
        storage
            .create_post(NewPost {
                text: "before restart".to_string(),
                author: author.id,
                group: None,
                image: None,
            })
            .await
            .unwrap()
    };

    let storage = open(&temp_dir);
    let author = storage.get_user_by_username("author").await.unwrap().unwrap();

    let second_post = storage
        .create_post(NewPost {
            text: "after restart".to_string(),
            author: author.id,
            group: None,
            image: None,
        })
        .await
        .unwrap();

    assert!(second_post.id > first_post.id);

    let posts = storage.posts_by_author(author.id).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].text, "after restart");
}

/// Sent and received indexes only list the user's own messages
#[tokio::test]
async fn test_messages_are_scoped_per_user() {
    let temp_dir = TempDir::new().unwrap();
    let storage = open(&temp_dir);

    let a = storage.create_user(NewUser::named("a")).await.unwrap();
    let b = storage.create_user(NewUser::named("b")).await.unwrap();
    let c = storage.create_user(NewUser::named("c")).await.unwrap();

    for (from, to) in [(a.id, b.id), (b.id, a.id), (c.id, a.id), (b.id, c.id)] {
        storage
            .create_message(NewMessage {
                text: "hi".to_string(),
                author: from,
                user: to,
                image: None,
            })
            .await
            .unwrap();
    }

    assert_eq!(storage.messages_sent_by(a.id).await.unwrap().len(), 1);
    assert_eq!(storage.messages_received_by(a.id).await.unwrap().len(), 2);
    assert_eq!(storage.messages_sent_by(b.id).await.unwrap().len(), 2);
    assert!(storage.messages_sent_by(a.id).await.unwrap().iter().all(|m| m.author == a.id));
}
