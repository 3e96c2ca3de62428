use std::sync::Arc;

use yatube_store::{sort_newest_first, Post, User};

use crate::{
    error::ApiResult,
    models::PostWithAuthor,
    pagination::{Page, Paginator},
    repository::{PostRepository, SocialGraphRepository},
};

/// Posts of the authors a user follows
pub struct FeedService {
    post_repo: Arc<PostRepository>,
    social_repo: Arc<SocialGraphRepository>,
    paginator: Paginator,
}

impl FeedService {
    pub fn new(
        post_repo: Arc<PostRepository>,
        social_repo: Arc<SocialGraphRepository>,
        paginator: Paginator,
    ) -> Self {
        Self {
            post_repo,
            social_repo,
            paginator,
        }
    }

    /// Every post by a followed author, newest first
    pub async fn feed_posts(&self, user: &User) -> ApiResult<Vec<Post>> {
        let following = self.social_repo.get_following_ids(user.id).await?;

        let mut posts = Vec::new();
        for author in following {
            posts.extend(self.post_repo.posts_by_author(author).await?);
        }
        sort_newest_first(&mut posts);

        tracing::debug!(user = %user.username, posts = posts.len(), "assembled feed");
        Ok(posts)
    }

    /// One page of the feed
    pub async fn feed(&self, user: &User, page: Option<&str>) -> ApiResult<Page<PostWithAuthor>> {
        let posts = self.feed_posts(user).await?;
        let page = self.paginator.get_page(posts, page);

        let items = self.post_repo.with_authors(page.items.clone()).await?;
        Ok(page.with_items(items))
    }
}
