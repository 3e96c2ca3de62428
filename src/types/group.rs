use super::RecordId;
use serde::{Deserialize, Serialize};

/// A community that posts may be published into
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: RecordId,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Input for creating a group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGroup {
    pub title: String,
    pub slug: String,
    pub description: String,
}
