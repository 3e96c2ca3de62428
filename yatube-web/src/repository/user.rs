use std::collections::HashMap;

use yatube_store::{NewUser, RecordId, SharedStorage, StorageError, User};

use crate::error::{ApiError, ApiResult};

pub struct UserRepository {
    storage: SharedStorage,
}

impl UserRepository {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Create a new user
    pub async fn create_user(&self, new_user: NewUser) -> ApiResult<User> {
        let username = new_user.username.clone();

        match self.storage.create_user(new_user).await {
            Ok(user) => Ok(user),
            Err(StorageError::Conflict { .. }) => Err(ApiError::AlreadyExists(format!(
                "User '{}' already exists",
                username
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Get user by username
    pub async fn get_user_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        Ok(self.storage.get_user_by_username(username).await?)
    }

    /// Get user by ID
    pub async fn get_user_by_id(&self, id: RecordId) -> ApiResult<Option<User>> {
        Ok(self.storage.get_user(id).await?)
    }

    /// Get user by username, or 404
    pub async fn require_by_username(&self, username: &str) -> ApiResult<User> {
        self.get_user_by_username(username)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User '{}' not found", username)))
    }

    /// Get user by ID, or 404
    pub async fn require_by_id(&self, id: RecordId) -> ApiResult<User> {
        self.get_user_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))
    }

    /// Load every user in `ids` once
    ///
    /// A referenced user that no longer exists means an index points at a
    /// missing record, which is reported as a database error.
    pub async fn load_many(
        &self,
        ids: impl IntoIterator<Item = RecordId>,
    ) -> ApiResult<HashMap<RecordId, User>> {
        let mut users = HashMap::new();

        for id in ids {
            if users.contains_key(&id) {
                continue;
            }
            let user = self
                .get_user_by_id(id)
                .await?
                .ok_or_else(|| ApiError::Database(format!("Dangling user reference {}", id)))?;
            users.insert(id, user);
        }

        Ok(users)
    }
}
