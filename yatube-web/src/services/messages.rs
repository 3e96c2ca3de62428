use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use yatube_store::{sort_newest_first, Message, NewMessage, RecordId, User};

use crate::{
    error::ApiResult,
    forms::MessageForm,
    models::{DialogueSummary, MailboxResponse},
    pagination::Paginator,
    repository::{MessageRepository, UserRepository},
};

pub struct MessageService {
    message_repo: Arc<MessageRepository>,
    user_repo: Arc<UserRepository>,
    paginator: Paginator,
}

impl MessageService {
    pub fn new(
        message_repo: Arc<MessageRepository>,
        user_repo: Arc<UserRepository>,
        paginator: Paginator,
    ) -> Self {
        Self {
            message_repo,
            user_repo,
            paginator,
        }
    }

    /// Send a message from `author` to `recipient_username`
    pub async fn send(
        &self,
        author: &User,
        recipient_username: &str,
        form: MessageForm,
    ) -> ApiResult<Message> {
        let recipient = self.user_repo.require_by_username(recipient_username).await?;

        let mut errors = form.validate();
        if recipient.id == author.id {
            errors.add("user", "You cannot send a message to yourself.");
        }
        if !errors.is_empty() {
            tracing::warn!(author = %author.username, %errors, "message rejected");
        }
        errors.into_result()?;

        let message = self
            .message_repo
            .create_message(NewMessage {
                text: form.text,
                author: author.id,
                user: recipient.id,
                image: form.image.filter(|path| !path.is_empty()),
            })
            .await?;

        tracing::info!(
            author = %author.username,
            recipient = %recipient.username,
            message = %message.id,
            "message sent"
        );
        Ok(message)
    }

    /// Sent and received messages of `user`, newest first
    pub async fn mailbox(&self, user: RecordId) -> ApiResult<Vec<Message>> {
        let mut messages = self.message_repo.sent_by(user).await?;
        let mut seen: HashSet<RecordId> = messages.iter().map(|m| m.id).collect();

        for message in self.message_repo.received_by(user).await? {
            if seen.insert(message.id) {
                messages.push(message);
            }
        }

        sort_newest_first(&mut messages);
        Ok(messages)
    }

    /// Messages exchanged between `user` and `other`, newest first
    pub async fn conversation(&self, user: RecordId, other: RecordId) -> ApiResult<Vec<Message>> {
        let mut messages = self.mailbox(user).await?;
        messages.retain(|m| m.counterpart(user) == other);
        Ok(messages)
    }

    /// Number of distinct users `user` has sent to or received from
    pub async fn dialogue_count(&self, user: RecordId) -> ApiResult<usize> {
        let mut counterparts: HashSet<RecordId> = HashSet::new();

        for message in self.message_repo.sent_by(user).await? {
            counterparts.insert(message.user);
        }
        for message in self.message_repo.received_by(user).await? {
            counterparts.insert(message.author);
        }

        Ok(counterparts.len())
    }

    /// One summary per counterpart, most recent conversation first
    pub async fn dialogues(&self, user: RecordId) -> ApiResult<Vec<DialogueSummary>> {
        let mailbox = self.mailbox(user).await?;

        // mailbox is newest first, so the first message seen per counterpart
        // is that dialogue's latest
        let mut order: Vec<RecordId> = Vec::new();
        let mut latest: HashMap<RecordId, Message> = HashMap::new();
        let mut counts: HashMap<RecordId, usize> = HashMap::new();

        for message in mailbox {
            let other = message.counterpart(user);
            *counts.entry(other).or_insert(0) += 1;
            if !latest.contains_key(&other) {
                order.push(other);
                latest.insert(other, message);
            }
        }

        let last_messages: Vec<Message> = order
            .iter()
            .filter_map(|id| latest.remove(id))
            .collect();
        let last_messages = self.message_repo.to_responses(last_messages).await?;

        let mut summaries = Vec::with_capacity(order.len());
        for (other, last_message) in order.into_iter().zip(last_messages) {
            let username = self.user_repo.require_by_id(other).await?.username;
            summaries.push(DialogueSummary {
                username,
                messages: counts.get(&other).copied().unwrap_or_default(),
                last_message,
            });
        }

        Ok(summaries)
    }

    /// Mailbox page of `viewer`
    ///
    /// When `username` names another user the page is narrowed to the
    /// conversation with them.
    pub async fn messages_page(
        &self,
        viewer: &User,
        username: &str,
        page: Option<&str>,
    ) -> ApiResult<MailboxResponse> {
        let correspondent = if username == viewer.username {
            None
        } else {
            Some(self.user_repo.require_by_username(username).await?)
        };

        let messages = match &correspondent {
            Some(other) => self.conversation(viewer.id, other.id).await?,
            None => self.mailbox(viewer.id).await?,
        };

        let page = self.paginator.get_page(messages, page);
        let items = self.message_repo.to_responses(page.items.clone()).await?;
        let dialogues = self.dialogues(viewer.id).await?;

        Ok(MailboxResponse {
            correspondent: correspondent.map(Into::into),
            page: page.with_items(items),
            dialogues_count: dialogues.len(),
            dialogues,
        })
    }
}
