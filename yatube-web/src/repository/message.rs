use std::sync::Arc;

use yatube_store::{Message, NewMessage, RecordId, SharedStorage};

use super::UserRepository;
use crate::{
    error::{ApiError, ApiResult},
    models::MessageResponse,
};

pub struct MessageRepository {
    storage: SharedStorage,
    user_repo: Arc<UserRepository>,
}

impl MessageRepository {
    pub fn new(storage: SharedStorage, user_repo: Arc<UserRepository>) -> Self {
        Self { storage, user_repo }
    }

    pub async fn create_message(&self, new_message: NewMessage) -> ApiResult<Message> {
        Ok(self.storage.create_message(new_message).await?)
    }

    /// Messages `user` sent, newest first
    pub async fn sent_by(&self, user: RecordId) -> ApiResult<Vec<Message>> {
        Ok(self.storage.messages_sent_by(user).await?)
    }

    /// Messages `user` received, newest first
    pub async fn received_by(&self, user: RecordId) -> ApiResult<Vec<Message>> {
        Ok(self.storage.messages_received_by(user).await?)
    }

    /// Resolve sender and recipient usernames
    pub async fn to_responses(&self, messages: Vec<Message>) -> ApiResult<Vec<MessageResponse>> {
        let users = self
            .user_repo
            .load_many(messages.iter().flat_map(|m| [m.author, m.user]).collect::<Vec<_>>())
            .await?;

        let username = |id: RecordId| {
            users
                .get(&id)
                .map(|u| u.username.clone())
                .ok_or_else(|| ApiError::Internal(format!("User {} not loaded", id)))
        };

        messages
            .into_iter()
            .map(|message| {
                Ok(MessageResponse {
                    author: username(message.author)?,
                    recipient: username(message.user)?,
                    id: message.id.to_string(),
                    text: message.text,
                    image: message.image,
                    created_at: message.created_at,
                })
            })
            .collect()
    }
}
