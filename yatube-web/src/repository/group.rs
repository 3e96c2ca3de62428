use yatube_store::{Group, NewGroup, RecordId, SharedStorage, StorageError};

use crate::error::{ApiError, ApiResult};

pub struct GroupRepository {
    storage: SharedStorage,
}

impl GroupRepository {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Create a group
    pub async fn create_group(&self, new_group: NewGroup) -> ApiResult<Group> {
        let slug = new_group.slug.clone();

        match self.storage.create_group(new_group).await {
            Ok(group) => Ok(group),
            Err(StorageError::Conflict { .. }) => Err(ApiError::AlreadyExists(format!(
                "Group '{}' already exists",
                slug
            ))),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_group(&self, id: RecordId) -> ApiResult<Option<Group>> {
        Ok(self.storage.get_group(id).await?)
    }

    /// Get group by slug, or 404
    pub async fn require_by_slug(&self, slug: &str) -> ApiResult<Group> {
        self.storage
            .get_group_by_slug(slug)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Group '{}' not found", slug)))
    }

    /// All groups in creation order
    pub async fn list_groups(&self) -> ApiResult<Vec<Group>> {
        Ok(self.storage.scan_groups().await?)
    }
}
