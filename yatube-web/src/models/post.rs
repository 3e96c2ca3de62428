use chrono::{DateTime, Utc};
use serde::Serialize;
use yatube_store::{Comment, Post};

use super::{GroupResponse, UserResponse};

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub image: Option<String>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            text: post.text,
            created_at: post.created_at,
            image: post.image,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: PostResponse,
    pub author: UserResponse,
    pub group: Option<GroupResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post: comment.post.to_string(),
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub author: UserResponse,
}
