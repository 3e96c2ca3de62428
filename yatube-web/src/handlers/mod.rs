pub mod groups;
pub mod health;
pub mod messages;
pub mod posts;
pub mod profile;
pub mod users;

use axum::{http::Uri, Json};
use serde_json::{json, Value};

use crate::error::ApiError;

/// Fallback for paths no route matches
pub async fn not_found(uri: Uri) -> (axum::http::StatusCode, Json<Value>) {
    let err = ApiError::NotFound(format!("Page '{}' not found", uri.path()));
    (
        err.status(),
        Json(json!({
            "error": err.to_string(),
            "status": err.status().as_u16(),
            "path": uri.path(),
        })),
    )
}
