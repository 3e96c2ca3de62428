use std::sync::Arc;

use yatube_store::{RecordId, User};

use crate::{
    error::ApiResult,
    models::UserResponse,
    repository::{SocialGraphRepository, UserRepository},
};

pub struct SocialGraphService {
    social_repo: Arc<SocialGraphRepository>,
    user_repo: Arc<UserRepository>,
}

impl SocialGraphService {
    pub fn new(social_repo: Arc<SocialGraphRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            social_repo,
            user_repo,
        }
    }

    /// Follow an author
    ///
    /// Following yourself is silently ignored; following twice keeps a
    /// single edge.
    pub async fn follow(&self, user: &User, author_username: &str) -> ApiResult<()> {
        let author = self.user_repo.require_by_username(author_username).await?;

        if author.id == user.id {
            tracing::warn!(user = %user.username, "ignoring self-follow");
            return Ok(());
        }

        if self.social_repo.follow_user(user.id, author.id).await? {
            tracing::info!(user = %user.username, author = %author.username, "follow created");
        }

        Ok(())
    }

    /// Unfollow an author; a missing edge is not an error
    pub async fn unfollow(&self, user: &User, author_username: &str) -> ApiResult<()> {
        let author = self.user_repo.require_by_username(author_username).await?;

        if author.id == user.id {
            return Ok(());
        }

        if self.social_repo.unfollow_user(user.id, author.id).await? {
            tracing::info!(user = %user.username, author = %author.username, "follow removed");
        }

        Ok(())
    }

    /// Whether `viewer` follows `author`; anonymous viewers follow nobody
    pub async fn is_following(&self, viewer: Option<&User>, author: &User) -> ApiResult<bool> {
        match viewer {
            Some(viewer) => self.social_repo.is_following(viewer.id, author.id).await,
            None => Ok(false),
        }
    }

    /// Authors followed by `username`
    pub async fn get_following(&self, username: &str) -> ApiResult<Vec<UserResponse>> {
        let user = self.user_repo.require_by_username(username).await?;
        let ids = self.social_repo.get_following_ids(user.id).await?;
        self.resolve(ids).await
    }

    /// Users following `username`
    pub async fn get_followers(&self, username: &str) -> ApiResult<Vec<UserResponse>> {
        let user = self.user_repo.require_by_username(username).await?;
        let ids = self.social_repo.get_follower_ids(user.id).await?;
        self.resolve(ids).await
    }

    async fn resolve(&self, ids: Vec<RecordId>) -> ApiResult<Vec<UserResponse>> {
        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            users.push(self.user_repo.require_by_id(id).await?.into());
        }
        Ok(users)
    }
}
