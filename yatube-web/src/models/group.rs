use serde::Serialize;
use yatube_store::Group;

use super::PostWithAuthor;
use crate::pagination::Page;

#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id.to_string(),
            title: group.title,
            slug: group.slug,
            description: group.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupPageResponse {
    pub group: GroupResponse,
    pub page: Page<PostWithAuthor>,
}
