use chrono::{DateTime, Utc};
use serde::Serialize;

use super::UserResponse;
use crate::pagination::Page;

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub text: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Sender username
    pub author: String,
    /// Recipient username
    pub recipient: String,
}

/// One entry per counterpart of a user
#[derive(Debug, Clone, Serialize)]
pub struct DialogueSummary {
    pub username: String,
    pub messages: usize,
    pub last_message: MessageResponse,
}

#[derive(Debug, Serialize)]
pub struct MailboxResponse {
    /// Set when the mailbox is narrowed to one conversation
    pub correspondent: Option<UserResponse>,
    pub page: Page<MessageResponse>,
    pub dialogues: Vec<DialogueSummary>,
    pub dialogues_count: usize,
}
