use serde::Serialize;

use super::{CommentWithAuthor, PostWithAuthor, UserResponse};
use crate::pagination::Page;

/// Per-author counters shown next to profiles and posts
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProfileCounters {
    pub posts: usize,
    pub comments: usize,
    pub dialogues: usize,
    pub followers: usize,
    pub following: usize,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub author: UserResponse,
    pub page: Page<PostWithAuthor>,
    /// Whether the requesting user follows this author
    pub following: bool,
    pub counters: ProfileCounters,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub author: UserResponse,
    pub post: PostWithAuthor,
    pub comments: Page<CommentWithAuthor>,
    pub following: bool,
    pub counters: ProfileCounters,
}
