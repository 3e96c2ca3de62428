use std::collections::HashMap;
use std::sync::Arc;

use yatube_store::{
    Comment, NewComment, NewPost, Post, PostChanges, RecordId, SharedStorage,
};

use super::UserRepository;
use crate::{
    error::{ApiError, ApiResult},
    models::{CommentWithAuthor, GroupResponse, PostWithAuthor},
};

pub struct PostRepository {
    storage: SharedStorage,
    user_repo: Arc<UserRepository>,
}

impl PostRepository {
    pub fn new(storage: SharedStorage, user_repo: Arc<UserRepository>) -> Self {
        Self { storage, user_repo }
    }

    // ---- posts ----

    pub async fn create_post(&self, new_post: NewPost) -> ApiResult<Post> {
        Ok(self.storage.create_post(new_post).await?)
    }

    pub async fn get_post(&self, id: RecordId) -> ApiResult<Option<Post>> {
        Ok(self.storage.get_post(id).await?)
    }

    /// Get a post by ID, or 404
    pub async fn require_post(&self, id: RecordId) -> ApiResult<Post> {
        self.get_post(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Post {} not found", id)))
    }

    pub async fn update_post(&self, id: RecordId, changes: PostChanges) -> ApiResult<Post> {
        Ok(self.storage.update_post(id, changes).await?)
    }

    /// Delete a post and its comments
    pub async fn delete_post(&self, id: RecordId) -> ApiResult<()> {
        Ok(self.storage.delete_post(id).await?)
    }

    /// Every post, newest first
    pub async fn all_posts(&self) -> ApiResult<Vec<Post>> {
        Ok(self.storage.scan_posts().await?)
    }

    pub async fn posts_by_author(&self, author: RecordId) -> ApiResult<Vec<Post>> {
        Ok(self.storage.posts_by_author(author).await?)
    }

    pub async fn posts_by_group(&self, group: RecordId) -> ApiResult<Vec<Post>> {
        Ok(self.storage.posts_by_group(group).await?)
    }

    // ---- comments ----

    pub async fn create_comment(&self, new_comment: NewComment) -> ApiResult<Comment> {
        Ok(self.storage.create_comment(new_comment).await?)
    }

    pub async fn get_comment(&self, id: RecordId) -> ApiResult<Option<Comment>> {
        Ok(self.storage.get_comment(id).await?)
    }

    pub async fn delete_comment(&self, id: RecordId) -> ApiResult<()> {
        Ok(self.storage.delete_comment(id).await?)
    }

    pub async fn comments_for_post(&self, post: RecordId) -> ApiResult<Vec<Comment>> {
        Ok(self.storage.comments_for_post(post).await?)
    }

    pub async fn count_comments_by_author(&self, author: RecordId) -> ApiResult<usize> {
        Ok(self.storage.count_comments_by_author(author).await?)
    }

    // ---- hydration ----

    /// Attach author and group records to posts, keeping their order
    pub async fn with_authors(&self, posts: Vec<Post>) -> ApiResult<Vec<PostWithAuthor>> {
        let authors = self
            .user_repo
            .load_many(posts.iter().map(|p| p.author).collect::<Vec<_>>())
            .await?;

        let mut groups: HashMap<RecordId, GroupResponse> = HashMap::new();
        let group_ids: Vec<RecordId> = posts.iter().filter_map(|p| p.group).collect();
        for group_id in group_ids {
            if groups.contains_key(&group_id) {
                continue;
            }
            // A group removed out of band simply drops off the post
            if let Some(group) = self.storage.get_group(group_id).await? {
                groups.insert(group_id, group.into());
            }
        }

        let mut hydrated = Vec::with_capacity(posts.len());
        for post in posts {
            let author = authors.get(&post.author).cloned().ok_or_else(|| {
                ApiError::Internal(format!("Author of post {} not loaded", post.id))
            })?;
            let group = post.group.and_then(|id| groups.get(&id).cloned());

            hydrated.push(PostWithAuthor {
                post: post.into(),
                author: author.into(),
                group,
            });
        }

        Ok(hydrated)
    }

    /// Attach author records to comments, keeping their order
    pub async fn comments_with_authors(
        &self,
        comments: Vec<Comment>,
    ) -> ApiResult<Vec<CommentWithAuthor>> {
        let authors = self
            .user_repo
            .load_many(comments.iter().map(|c| c.author).collect::<Vec<_>>())
            .await?;

        comments
            .into_iter()
            .map(|comment| {
                let author = authors.get(&comment.author).cloned().ok_or_else(|| {
                    ApiError::Internal(format!("Author of comment {} not loaded", comment.id))
                })?;
                Ok(CommentWithAuthor {
                    comment: comment.into(),
                    author: author.into(),
                })
            })
            .collect()
    }
}
