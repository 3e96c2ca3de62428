use yatube_store::{RecordId, SharedStorage};

use crate::error::ApiResult;

pub struct SocialGraphRepository {
    storage: SharedStorage,
}

impl SocialGraphRepository {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Create the follow edge if absent
    ///
    /// Returns whether a new edge was stored.
    pub async fn follow_user(&self, user: RecordId, author: RecordId) -> ApiResult<bool> {
        Ok(self.storage.follow(user, author).await?)
    }

    /// Remove the follow edge if present
    pub async fn unfollow_user(&self, user: RecordId, author: RecordId) -> ApiResult<bool> {
        Ok(self.storage.unfollow(user, author).await?)
    }

    pub async fn is_following(&self, user: RecordId, author: RecordId) -> ApiResult<bool> {
        Ok(self.storage.get_follow(user, author).await?.is_some())
    }

    /// IDs of the authors `user` follows
    pub async fn get_following_ids(&self, user: RecordId) -> ApiResult<Vec<RecordId>> {
        Ok(self.storage.following_of(user).await?)
    }

    /// IDs of the users following `author`
    pub async fn get_follower_ids(&self, author: RecordId) -> ApiResult<Vec<RecordId>> {
        Ok(self.storage.followers_of(author).await?)
    }
}
