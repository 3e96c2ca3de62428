//! Request identity
//!
//! Authentication happens upstream; the session layer forwards the signed-in
//! username in `X-Username`. These extractors turn it into a stored user.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use yatube_store::User;

use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

pub const USERNAME_HEADER: &str = "x-username";

fn header_username(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(USERNAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

async fn lookup(parts: &Parts, state: &AppState) -> ApiResult<Option<User>> {
    match header_username(parts) {
        Some(username) => state.user_service.find_user(username).await,
        None => Ok(None),
    }
}

/// Signed-in user; rejects the request with 401 otherwise
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        lookup(parts, state)
            .await?
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized)
    }
}

/// Signed-in user if there is one
///
/// An unknown username is treated as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl MaybeUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(lookup(parts, state).await?))
    }
}
