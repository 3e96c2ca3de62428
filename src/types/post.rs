use super::{Chronological, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: RecordId,
    pub text: String,
    pub author: RecordId,
    pub group: Option<RecordId>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Chronological for Post {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// Input for creating a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub text: String,
    pub author: RecordId,
    pub group: Option<RecordId>,
    pub image: Option<String>,
}

/// Replacement values for the editable fields of a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostChanges {
    pub text: String,
    pub group: Option<RecordId>,
    pub image: Option<String>,
}

/// A comment attached to a post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: RecordId,
    pub post: RecordId,
    pub author: RecordId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Chronological for Comment {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// Input for creating a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub post: RecordId,
    pub author: RecordId,
    pub text: String,
}
