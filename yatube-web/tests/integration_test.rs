use std::sync::Arc;

use tempfile::TempDir;
use yatube_store::{storage::rocksdb_store::RocksDbStorage, RecordId, SharedStorage, User};
use yatube_web::{
    config::PaginationConfig,
    error::ApiError,
    forms::{CommentForm, GroupForm, MessageForm, PostForm, SignupForm},
    services::Mutation,
    AppState,
};

fn setup_test_state() -> (AppState, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage: SharedStorage =
        Arc::new(RocksDbStorage::new(temp_dir.path(), "test_yatube").unwrap());

    let state = AppState::new(storage, &PaginationConfig::default());
    (state, temp_dir)
}

async fn signup(state: &AppState, username: &str) -> User {
    state
        .user_service
        .signup(SignupForm {
            username: username.to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
}

async fn publish(state: &AppState, author: &User, text: &str, group: Option<RecordId>) -> RecordId {
    state
        .content_service
        .create_post(
            author,
            PostForm {
                text: text.to_string(),
                group,
                image: None,
            },
        )
        .await
        .unwrap()
        .id
}

async fn send(state: &AppState, from: &User, to: &User, text: &str) {
    state
        .message_service
        .send(
            from,
            &to.username,
            MessageForm {
                text: text.to_string(),
                image: None,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_signup_rejects_duplicate_username() {
    let (state, _temp_dir) = setup_test_state();
    signup(&state, "leo").await;

    let result = state
        .user_service
        .signup(SignupForm {
            username: "leo".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(ApiError::AlreadyExists(_))));

    let result = state.user_service.signup(SignupForm::default()).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn test_follow_then_unfollow_leaves_no_edge() {
    let (state, _temp_dir) = setup_test_state();
    let reader = signup(&state, "reader").await;
    let writer = signup(&state, "writer").await;

    state.social_service.follow(&reader, "writer").await.unwrap();
    assert!(state
        .social_service
        .is_following(Some(&reader), &writer)
        .await
        .unwrap());

    state.social_service.unfollow(&reader, "writer").await.unwrap();
    assert!(!state
        .social_service
        .is_following(Some(&reader), &writer)
        .await
        .unwrap());

    // Unfollowing again is a no-op
    state.social_service.unfollow(&reader, "writer").await.unwrap();
}

#[tokio::test]
async fn test_repeated_follow_keeps_one_edge() {
    let (state, _temp_dir) = setup_test_state();
    let reader = signup(&state, "reader").await;
    signup(&state, "writer").await;

    for _ in 0..3 {
        state.social_service.follow(&reader, "writer").await.unwrap();
    }

    let followers = state.social_service.get_followers("writer").await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].username, "reader");
}

#[tokio::test]
async fn test_self_follow_is_ignored() {
    let (state, _temp_dir) = setup_test_state();
    let leo = signup(&state, "leo").await;

    state.social_service.follow(&leo, "leo").await.unwrap();

    assert!(!state.social_service.is_following(Some(&leo), &leo).await.unwrap());
    assert!(state.social_service.get_following("leo").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_follow_unknown_author_is_not_found() {
    let (state, _temp_dir) = setup_test_state();
    let leo = signup(&state, "leo").await;

    let result = state.social_service.follow(&leo, "ghost").await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_feed_contains_only_followed_authors_newest_first() {
    let (state, _temp_dir) = setup_test_state();
    let reader = signup(&state, "reader").await;
    let followed = signup(&state, "followed").await;
    let other = signup(&state, "other").await;

    let first = publish(&state, &followed, "first", None).await;
    publish(&state, &other, "not in feed", None).await;
    let second = publish(&state, &followed, "second", None).await;

    // Nothing followed yet
    let page = state.feed_service.feed(&reader, None).await.unwrap();
    assert!(page.is_empty());

    state.social_service.follow(&reader, "followed").await.unwrap();

    let page = state.feed_service.feed(&reader, None).await.unwrap();
    let ids: Vec<String> = page.items.iter().map(|p| p.post.id.clone()).collect();
    assert_eq!(ids, vec![second.to_string(), first.to_string()]);
    assert!(page.items.iter().all(|p| p.author.username == "followed"));

    // The author does not see their own posts in their feed
    let page = state.feed_service.feed(&followed, None).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_index_paginates_thirteen_posts() {
    let (state, _temp_dir) = setup_test_state();
    let leo = signup(&state, "leo").await;

    for i in 0..13 {
        publish(&state, &leo, &format!("post {}", i), None).await;
    }

    let first = state.content_service.index(None).await.unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first.items[0].post.text, "post 12");

    let second = state.content_service.index(Some("2")).await.unwrap();
    assert_eq!(second.len(), 3);

    let clamped = state.content_service.index(Some("40")).await.unwrap();
    assert_eq!(clamped.number, 2);
}

#[tokio::test]
async fn test_group_page_holds_twelve_and_only_its_posts() {
    let (state, _temp_dir) = setup_test_state();
    let leo = signup(&state, "leo").await;

    let cats = state
        .content_service
        .create_group(
            &leo,
            GroupForm {
                title: "Cats".to_string(),
                slug: "cats".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
    let dogs = state
        .content_service
        .create_group(
            &leo,
            GroupForm {
                title: "Dogs".to_string(),
                slug: "dogs".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

    let cats_id: RecordId = cats.id.parse().unwrap();
    let dogs_id: RecordId = dogs.id.parse().unwrap();

    for i in 0..13 {
        publish(&state, &leo, &format!("cat {}", i), Some(cats_id)).await;
    }
    publish(&state, &leo, "woof", Some(dogs_id)).await;

    let page = state.content_service.group_page("cats", None).await.unwrap();
    assert_eq!(page.page.len(), 12);
    assert_eq!(page.page.count, 13);
    assert!(page.page.items.iter().all(|p| p.post.text.starts_with("cat")));

    let page = state.content_service.group_page("cats", Some("2")).await.unwrap();
    assert_eq!(page.page.len(), 1);

    let page = state.content_service.group_page("dogs", None).await.unwrap();
    assert_eq!(page.page.len(), 1);
    assert_eq!(page.page.items[0].group.as_ref().unwrap().slug, "dogs");

    let result = state.content_service.group_page("birds", None).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_post_with_unknown_group_is_rejected() {
    let (state, _temp_dir) = setup_test_state();
    let leo = signup(&state, "leo").await;

    let result = state
        .content_service
        .create_post(
            &leo,
            PostForm {
                text: "hello".to_string(),
                group: Some(RecordId::from_raw(99)),
                image: None,
            },
        )
        .await;

    match result {
        Err(ApiError::Validation(errors)) => assert!(errors.get("group").is_some()),
        other => panic!("expected validation error, got {:?}", other.map(|p| p.id)),
    }
}

#[tokio::test]
async fn test_edit_by_non_author_leaves_post_unchanged() {
    let (state, _temp_dir) = setup_test_state();
    let author = signup(&state, "author").await;
    let intruder = signup(&state, "intruder").await;
    let post_id = publish(&state, &author, "original", None).await;

    let outcome = state
        .content_service
        .edit_post(
            &intruder,
            "author",
            post_id,
            PostForm {
                text: "defaced".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome, Mutation::Denied);

    let detail = state
        .content_service
        .post_detail("author", post_id, None, None)
        .await
        .unwrap();
    assert_eq!(detail.post.post.text, "original");

    let outcome = state
        .content_service
        .edit_post(
            &author,
            "author",
            post_id,
            PostForm {
                text: "revised".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome, Mutation::Applied);

    let detail = state
        .content_service
        .post_detail("author", post_id, None, None)
        .await
        .unwrap();
    assert_eq!(detail.post.post.text, "revised");
}

#[tokio::test]
async fn test_edit_without_image_keeps_stored_image() {
    let (state, _temp_dir) = setup_test_state();
    let author = signup(&state, "author").await;

    let post_id = state
        .content_service
        .create_post(
            &author,
            PostForm {
                text: "with picture".to_string(),
                group: None,
                image: Some("posts/cat.jpg".to_string()),
            },
        )
        .await
        .unwrap()
        .id;

    let edit = |text: &str, image: Option<&str>| PostForm {
        text: text.to_string(),
        group: None,
        image: image.map(str::to_string),
    };

    // Text-only edit keeps the picture
    state
        .content_service
        .edit_post(&author, "author", post_id, edit("new text", None))
        .await
        .unwrap();
    let detail = state
        .content_service
        .post_detail("author", post_id, None, None)
        .await
        .unwrap();
    assert_eq!(detail.post.post.text, "new text");
    assert_eq!(detail.post.post.image.as_deref(), Some("posts/cat.jpg"));

    // A new path replaces it
    state
        .content_service
        .edit_post(&author, "author", post_id, edit("new text", Some("posts/dog.jpg")))
        .await
        .unwrap();
    let detail = state
        .content_service
        .post_detail("author", post_id, None, None)
        .await
        .unwrap();
    assert_eq!(detail.post.post.image.as_deref(), Some("posts/dog.jpg"));

    // An empty path clears it
    state
        .content_service
        .edit_post(&author, "author", post_id, edit("new text", Some("")))
        .await
        .unwrap();
    let detail = state
        .content_service
        .post_detail("author", post_id, None, None)
        .await
        .unwrap();
    assert_eq!(detail.post.post.image, None);
}

#[tokio::test]
async fn test_post_under_wrong_username_is_not_found() {
    let (state, _temp_dir) = setup_test_state();
    let author = signup(&state, "author").await;
    signup(&state, "someone").await;
    let post_id = publish(&state, &author, "text", None).await;

    let result = state
        .content_service
        .post_detail("someone", post_id, None, None)
        .await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_deleting_post_removes_comments() {
    let (state, _temp_dir) = setup_test_state();
    let author = signup(&state, "author").await;
    let reader = signup(&state, "reader").await;
    let post_id = publish(&state, &author, "text", None).await;

    state
        .content_service
        .add_comment(
            &reader,
            "author",
            post_id,
            CommentForm {
                text: "nice".to_string(),
            },
        )
        .await
        .unwrap();

    let counters = state.user_service.counters(&reader).await.unwrap();
    assert_eq!(counters.comments, 1);

    // Only the author may delete
    let outcome = state
        .content_service
        .delete_post(&reader, "author", post_id)
        .await
        .unwrap();
    assert_eq!(outcome, Mutation::Denied);

    let outcome = state
        .content_service
        .delete_post(&author, "author", post_id)
        .await
        .unwrap();
    assert_eq!(outcome, Mutation::Applied);

    let counters = state.user_service.counters(&reader).await.unwrap();
    assert_eq!(counters.comments, 0);

    let result = state
        .content_service
        .post_detail("author", post_id, None, None)
        .await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_comment_delete_permissions() {
    let (state, _temp_dir) = setup_test_state();
    let author = signup(&state, "author").await;
    let commenter = signup(&state, "commenter").await;
    let bystander = signup(&state, "bystander").await;
    let post_id = publish(&state, &author, "text", None).await;

    let comment = state
        .content_service
        .add_comment(
            &commenter,
            "author",
            post_id,
            CommentForm {
                text: "first".to_string(),
            },
        )
        .await
        .unwrap();

    let outcome = state
        .content_service
        .delete_comment(&bystander, "author", post_id, comment.id)
        .await
        .unwrap();
    assert_eq!(outcome, Mutation::Denied);

    let outcome = state
        .content_service
        .delete_comment(&author, "author", post_id, comment.id)
        .await
        .unwrap();
    assert_eq!(outcome, Mutation::Applied);

    let detail = state
        .content_service
        .post_detail("author", post_id, None, None)
        .await
        .unwrap();
    assert!(detail.comments.is_empty());
}

#[tokio::test]
async fn test_blank_comment_is_rejected() {
    let (state, _temp_dir) = setup_test_state();
    let author = signup(&state, "author").await;
    let post_id = publish(&state, &author, "text", None).await;

    let result = state
        .content_service
        .add_comment(&author, "author", post_id, CommentForm::default())
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn test_dialogue_count_counts_distinct_counterparts() {
    let (state, _temp_dir) = setup_test_state();
    let leo = signup(&state, "leo").await;
    let anna = signup(&state, "anna").await;
    let pierre = signup(&state, "pierre").await;
    let natasha = signup(&state, "natasha").await;

    send(&state, &leo, &anna, "hello").await;
    send(&state, &anna, &leo, "hi").await;
    send(&state, &leo, &anna, "how are you").await;
    send(&state, &pierre, &leo, "ping").await;
    send(&state, &natasha, &anna, "not for leo").await;

    assert_eq!(state.message_service.dialogue_count(leo.id).await.unwrap(), 2);
    assert_eq!(state.message_service.dialogue_count(anna.id).await.unwrap(), 2);
    assert_eq!(state.message_service.dialogue_count(natasha.id).await.unwrap(), 1);

    let counters = state.user_service.counters(&leo).await.unwrap();
    assert_eq!(counters.dialogues, 2);

    let dialogues = state.message_service.dialogues(leo.id).await.unwrap();
    let names: Vec<&str> = dialogues.iter().map(|d| d.username.as_str()).collect();
    assert_eq!(names, vec!["pierre", "anna"]);
    assert_eq!(dialogues[1].messages, 3);
    assert_eq!(dialogues[1].last_message.text, "how are you");
}

#[tokio::test]
async fn test_mailbox_and_conversation() {
    let (state, _temp_dir) = setup_test_state();
    let leo = signup(&state, "leo").await;
    let anna = signup(&state, "anna").await;
    let pierre = signup(&state, "pierre").await;

    send(&state, &leo, &anna, "one").await;
    send(&state, &pierre, &leo, "two").await;
    send(&state, &anna, &leo, "three").await;

    let mailbox = state.message_service.mailbox(leo.id).await.unwrap();
    let texts: Vec<&str> = mailbox.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["three", "two", "one"]);

    let page = state
        .message_service
        .messages_page(&leo, "anna", None)
        .await
        .unwrap();
    assert_eq!(page.correspondent.unwrap().username, "anna");
    let texts: Vec<&str> = page.page.items.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["three", "one"]);
    assert_eq!(page.dialogues_count, 2);

    let own = state
        .message_service
        .messages_page(&leo, "leo", None)
        .await
        .unwrap();
    assert!(own.correspondent.is_none());
    assert_eq!(own.page.count, 3);
}

#[tokio::test]
async fn test_message_validation() {
    let (state, _temp_dir) = setup_test_state();
    let leo = signup(&state, "leo").await;
    signup(&state, "anna").await;

    let result = state
        .message_service
        .send(&leo, "anna", MessageForm::default())
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    let result = state
        .message_service
        .send(
            &leo,
            "leo",
            MessageForm {
                text: "note to self".to_string(),
                image: None,
            },
        )
        .await;
    match result {
        Err(ApiError::Validation(errors)) => assert!(errors.get("user").is_some()),
        other => panic!("expected validation error, got {:?}", other.map(|m| m.id)),
    }

    let result = state
        .message_service
        .send(
            &leo,
            "ghost",
            MessageForm {
                text: "hello?".to_string(),
                image: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_profile_counters() {
    let (state, _temp_dir) = setup_test_state();
    let leo = signup(&state, "leo").await;
    let anna = signup(&state, "anna").await;

    publish(&state, &leo, "one", None).await;
    publish(&state, &leo, "two", None).await;
    state.social_service.follow(&anna, "leo").await.unwrap();
    send(&state, &anna, &leo, "hello").await;

    let profile = state
        .content_service
        .profile("leo", Some(&anna), None)
        .await
        .unwrap();

    assert!(profile.following);
    assert_eq!(profile.page.count, 2);
    assert_eq!(profile.counters.posts, 2);
    assert_eq!(profile.counters.followers, 1);
    assert_eq!(profile.counters.following, 0);
    assert_eq!(profile.counters.dialogues, 1);

    let anonymous = state.content_service.profile("leo", None, None).await.unwrap();
    assert!(!anonymous.following);
}
