use std::sync::Arc;

use yatube_store::{NewUser, User};

use crate::{
    error::ApiResult,
    forms::SignupForm,
    models::ProfileCounters,
    repository::{PostRepository, SocialGraphRepository, UserRepository},
    services::MessageService,
};

pub struct UserService {
    user_repo: Arc<UserRepository>,
    post_repo: Arc<PostRepository>,
    social_repo: Arc<SocialGraphRepository>,
    message_service: Arc<MessageService>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        post_repo: Arc<PostRepository>,
        social_repo: Arc<SocialGraphRepository>,
        message_service: Arc<MessageService>,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            social_repo,
            message_service,
        }
    }

    /// Register a new user
    pub async fn signup(&self, form: SignupForm) -> ApiResult<User> {
        form.validate().into_result()?;

        let user = self
            .user_repo
            .create_user(NewUser {
                username: form.username,
                first_name: form.first_name.trim().to_string(),
                last_name: form.last_name.trim().to_string(),
                email: form.email,
            })
            .await?;

        tracing::info!(user = %user.username, id = %user.id, "user signed up");
        Ok(user)
    }

    /// Resolve an identity that may name a user who does not exist
    pub async fn find_user(&self, username: &str) -> ApiResult<Option<User>> {
        self.user_repo.get_user_by_username(username).await
    }

    /// Counters shown next to an author, computed on every call
    pub async fn counters(&self, user: &User) -> ApiResult<ProfileCounters> {
        Ok(ProfileCounters {
            posts: self.post_repo.posts_by_author(user.id).await?.len(),
            comments: self.post_repo.count_comments_by_author(user.id).await?,
            dialogues: self.message_service.dialogue_count(user.id).await?,
            followers: self.social_repo.get_follower_ids(user.id).await?.len(),
            following: self.social_repo.get_following_ids(user.id).await?.len(),
        })
    }
}
