use std::sync::Arc;

use yatube_store::{Comment, NewComment, NewGroup, NewPost, Post, PostChanges, RecordId, User};

use crate::{
    error::{ApiError, ApiResult, FieldErrors},
    forms::{CommentForm, GroupForm, PostForm},
    models::{GroupPageResponse, GroupResponse, PostDetailResponse, PostWithAuthor, ProfileResponse},
    pagination::{Page, Paginator},
    repository::{GroupRepository, PostRepository, UserRepository},
    services::{SocialGraphService, UserService},
};

/// Result of an edit or delete that only some users may perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// The requester is not allowed to change the record; nothing was written
    Denied,
}

pub struct ContentService {
    post_repo: Arc<PostRepository>,
    user_repo: Arc<UserRepository>,
    group_repo: Arc<GroupRepository>,
    social_service: Arc<SocialGraphService>,
    user_service: Arc<UserService>,
    paginator: Paginator,
    group_paginator: Paginator,
}

impl ContentService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        post_repo: Arc<PostRepository>,
        user_repo: Arc<UserRepository>,
        group_repo: Arc<GroupRepository>,
        social_service: Arc<SocialGraphService>,
        user_service: Arc<UserService>,
        paginator: Paginator,
        group_paginator: Paginator,
    ) -> Self {
        Self {
            post_repo,
            user_repo,
            group_repo,
            social_service,
            user_service,
            paginator,
            group_paginator,
        }
    }

    async fn hydrate_page(&self, page: Page<Post>) -> ApiResult<Page<PostWithAuthor>> {
        let items = self.post_repo.with_authors(page.items.clone()).await?;
        Ok(page.with_items(items))
    }

    /// Post `post_id` as addressed under `username`
    ///
    /// A post exists at that address only when `username` is its author.
    async fn post_at(&self, username: &str, post_id: RecordId) -> ApiResult<(User, Post)> {
        let author = self.user_repo.require_by_username(username).await?;
        let post = self.post_repo.require_post(post_id).await?;

        if post.author != author.id {
            return Err(ApiError::NotFound(format!(
                "Post {} by '{}' not found",
                post_id, username
            )));
        }

        Ok((author, post))
    }

    /// Check that a selected group exists
    async fn check_group(&self, group: Option<RecordId>, errors: &mut FieldErrors) -> ApiResult<()> {
        if let Some(id) = group {
            if self.group_repo.get_group(id).await?.is_none() {
                errors.add(
                    "group",
                    "Select a valid choice. That choice is not one of the available choices.",
                );
            }
        }
        Ok(())
    }

    // ---- listings ----

    /// Every post, newest first
    pub async fn index(&self, page: Option<&str>) -> ApiResult<Page<PostWithAuthor>> {
        let posts = self.post_repo.all_posts().await?;
        self.hydrate_page(self.paginator.get_page(posts, page)).await
    }

    /// A group and its posts
    pub async fn group_page(&self, slug: &str, page: Option<&str>) -> ApiResult<GroupPageResponse> {
        let group = self.group_repo.require_by_slug(slug).await?;
        let posts = self.post_repo.posts_by_group(group.id).await?;
        let page = self.hydrate_page(self.group_paginator.get_page(posts, page)).await?;

        Ok(GroupPageResponse {
            group: group.into(),
            page,
        })
    }

    pub async fn list_groups(&self) -> ApiResult<Vec<GroupResponse>> {
        let groups = self.group_repo.list_groups().await?;
        Ok(groups.into_iter().map(Into::into).collect())
    }

    /// Create a group
    pub async fn create_group(&self, creator: &User, form: GroupForm) -> ApiResult<GroupResponse> {
        form.validate().into_result()?;

        let group = self
            .group_repo
            .create_group(NewGroup {
                title: form.title.trim().to_string(),
                slug: form.slug,
                description: form.description,
            })
            .await?;

        tracing::info!(user = %creator.username, slug = %group.slug, "group created");
        Ok(group.into())
    }

    /// An author's profile with their posts
    pub async fn profile(
        &self,
        username: &str,
        viewer: Option<&User>,
        page: Option<&str>,
    ) -> ApiResult<ProfileResponse> {
        let author = self.user_repo.require_by_username(username).await?;
        let posts = self.post_repo.posts_by_author(author.id).await?;
        let page = self.hydrate_page(self.paginator.get_page(posts, page)).await?;

        let following = self.social_service.is_following(viewer, &author).await?;
        let counters = self.user_service.counters(&author).await?;

        Ok(ProfileResponse {
            author: author.into(),
            page,
            following,
            counters,
        })
    }

    /// A single post with its comments
    pub async fn post_detail(
        &self,
        username: &str,
        post_id: RecordId,
        viewer: Option<&User>,
        page: Option<&str>,
    ) -> ApiResult<PostDetailResponse> {
        let (author, post) = self.post_at(username, post_id).await?;

        let comments = self.post_repo.comments_for_post(post.id).await?;
        let comments = self.paginator.get_page(comments, page);
        let comment_items = self
            .post_repo
            .comments_with_authors(comments.items.clone())
            .await?;

        let mut hydrated = self.post_repo.with_authors(vec![post]).await?;
        let post = hydrated
            .pop()
            .ok_or_else(|| ApiError::Internal(format!("Post {} lost during hydration", post_id)))?;

        let following = self.social_service.is_following(viewer, &author).await?;
        let counters = self.user_service.counters(&author).await?;

        Ok(PostDetailResponse {
            author: author.into(),
            post,
            comments: comments.with_items(comment_items),
            following,
            counters,
        })
    }

    // ---- posts ----

    /// Publish a new post as `author`
    pub async fn create_post(&self, author: &User, form: PostForm) -> ApiResult<Post> {
        let mut errors = form.validate();
        self.check_group(form.group, &mut errors).await?;
        errors.into_result()?;

        let post = self
            .post_repo
            .create_post(NewPost {
                text: form.text,
                author: author.id,
                group: form.group,
                image: form.image.filter(|path| !path.is_empty()),
            })
            .await?;

        tracing::info!(author = %author.username, post = %post.id, "post created");
        Ok(post)
    }

    /// Replace a post's text and group; only its author may do so
    ///
    /// The image is replaced only when the form carries one. An empty image
    /// path clears it.
    pub async fn edit_post(
        &self,
        editor: &User,
        username: &str,
        post_id: RecordId,
        form: PostForm,
    ) -> ApiResult<Mutation> {
        let (author, post) = self.post_at(username, post_id).await?;

        if editor.id != author.id {
            tracing::warn!(user = %editor.username, post = %post.id, "edit denied");
            return Ok(Mutation::Denied);
        }

        let mut errors = form.validate();
        self.check_group(form.group, &mut errors).await?;
        errors.into_result()?;

        let image = match form.image {
            Some(path) if path.is_empty() => None,
            Some(path) => Some(path),
            None => post.image.clone(),
        };

        self.post_repo
            .update_post(
                post.id,
                PostChanges {
                    text: form.text,
                    group: form.group,
                    image,
                },
            )
            .await?;

        tracing::info!(author = %author.username, post = %post.id, "post edited");
        Ok(Mutation::Applied)
    }

    /// Delete a post with its comments; only its author may do so
    pub async fn delete_post(
        &self,
        requester: &User,
        username: &str,
        post_id: RecordId,
    ) -> ApiResult<Mutation> {
        let (author, post) = self.post_at(username, post_id).await?;

        if requester.id != author.id {
            tracing::warn!(user = %requester.username, post = %post.id, "delete denied");
            return Ok(Mutation::Denied);
        }

        self.post_repo.delete_post(post.id).await?;

        tracing::info!(author = %author.username, post = %post.id, "post deleted");
        Ok(Mutation::Applied)
    }

    // ---- comments ----

    /// Comment on the post at `username`/`post_id`
    pub async fn add_comment(
        &self,
        author: &User,
        username: &str,
        post_id: RecordId,
        form: CommentForm,
    ) -> ApiResult<Comment> {
        let (_, post) = self.post_at(username, post_id).await?;
        form.validate().into_result()?;

        let comment = self
            .post_repo
            .create_comment(NewComment {
                post: post.id,
                author: author.id,
                text: form.text,
            })
            .await?;

        tracing::info!(author = %author.username, post = %post.id, comment = %comment.id, "comment added");
        Ok(comment)
    }

    /// Delete a comment; its author and the post's author may do so
    pub async fn delete_comment(
        &self,
        requester: &User,
        username: &str,
        post_id: RecordId,
        comment_id: RecordId,
    ) -> ApiResult<Mutation> {
        let (author, post) = self.post_at(username, post_id).await?;

        let comment = self
            .post_repo
            .get_comment(comment_id)
            .await?
            .filter(|c| c.post == post.id)
            .ok_or_else(|| {
                ApiError::NotFound(format!("Comment {} on post {} not found", comment_id, post.id))
            })?;

        if requester.id != comment.author && requester.id != author.id {
            tracing::warn!(user = %requester.username, comment = %comment.id, "comment delete denied");
            return Ok(Mutation::Denied);
        }

        self.post_repo.delete_comment(comment.id).await?;

        tracing::info!(user = %requester.username, comment = %comment.id, "comment deleted");
        Ok(Mutation::Applied)
    }
}
