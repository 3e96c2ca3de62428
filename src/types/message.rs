use super::{Chronological, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A direct message from `author` to `user`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: RecordId,
    pub text: String,
    pub author: RecordId,
    pub user: RecordId,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// The other side of this message as seen by `viewer`
    pub fn counterpart(&self, viewer: RecordId) -> RecordId {
        if self.author == viewer {
            self.user
        } else {
            self.author
        }
    }
}

impl Chronological for Message {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// Input for sending a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub text: String,
    pub author: RecordId,
    pub user: RecordId,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counterpart() {
        let message = Message {
            id: RecordId::from_raw(1),
            text: "hi".to_string(),
            author: RecordId::from_raw(10),
            user: RecordId::from_raw(20),
            image: None,
            created_at: Utc::now(),
        };

        assert_eq!(message.counterpart(RecordId::from_raw(10)), RecordId::from_raw(20));
        assert_eq!(message.counterpart(RecordId::from_raw(20)), RecordId::from_raw(10));
    }
}
