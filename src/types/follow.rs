use super::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directed follow edge: `user` receives `author`'s posts in their feed
///
/// The (user, author) pair is the identity of the edge; there is no
/// separate id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Follow {
    pub user: RecordId,
    pub author: RecordId,
    pub created_at: DateTime<Utc>,
}
