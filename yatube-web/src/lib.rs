//! Yatube web service
//!
//! HTTP layer over `yatube-store`: repositories wrap the storage trait,
//! services carry the blog rules, handlers translate requests into service
//! calls and answer JSON documents or redirects.

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, ApiResult};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use yatube_store::SharedStorage;

use config::PaginationConfig;
use handlers::{groups, health, messages, posts, profile, users};
use pagination::Paginator;
use repository::{
    GroupRepository, MessageRepository, PostRepository, SocialGraphRepository, UserRepository,
};
use services::{ContentService, FeedService, MessageService, SocialGraphService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub social_service: Arc<SocialGraphService>,
    pub content_service: Arc<ContentService>,
    pub feed_service: Arc<FeedService>,
    pub message_service: Arc<MessageService>,
}

impl AppState {
    /// Wire repositories and services over one storage handle
    pub fn new(storage: SharedStorage, pagination: &PaginationConfig) -> Self {
        let paginator = Paginator::new(pagination.page_size);
        let group_paginator = Paginator::new(pagination.group_page_size);

        // Create repositories
        let user_repo = Arc::new(UserRepository::new(storage.clone()));
        let group_repo = Arc::new(GroupRepository::new(storage.clone()));
        let social_repo = Arc::new(SocialGraphRepository::new(storage.clone()));
        let post_repo = Arc::new(PostRepository::new(storage.clone(), user_repo.clone()));
        let message_repo = Arc::new(MessageRepository::new(storage, user_repo.clone()));

        // Create services
        let message_service = Arc::new(MessageService::new(
            message_repo,
            user_repo.clone(),
            paginator,
        ));
        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            post_repo.clone(),
            social_repo.clone(),
            message_service.clone(),
        ));
        let social_service = Arc::new(SocialGraphService::new(
            social_repo.clone(),
            user_repo.clone(),
        ));
        let feed_service = Arc::new(FeedService::new(
            post_repo.clone(),
            social_repo,
            paginator,
        ));
        let content_service = Arc::new(ContentService::new(
            post_repo,
            user_repo,
            group_repo,
            social_service.clone(),
            user_service.clone(),
            paginator,
            group_paginator,
        ));

        Self {
            user_service,
            social_service,
            content_service,
            feed_service,
            message_service,
        }
    }
}

/// All routes of the service, without transport middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Listings
        .route("/", get(posts::index))
        .route("/group/:slug/", get(groups::group_posts))
        .route(
            "/groups/",
            get(groups::list_groups).post(groups::create_group),
        )
        .route("/follow/", get(profile::follow_index))
        // Accounts and posting
        .route("/auth/signup/", post(users::signup))
        .route("/new/", post(posts::new_post))
        // Profiles
        .route("/:username/", get(profile::profile))
        .route("/:username/follow/", post(profile::profile_follow))
        .route("/:username/unfollow/", post(profile::profile_unfollow))
        .route("/:username/following/", get(profile::following))
        .route("/:username/followers/", get(profile::followers))
        // Messages
        .route("/:username/send_message/", post(messages::send_message))
        .route("/:username/messages/", get(messages::messages))
        // Posts and comments
        .route(
            "/:username/:post_id/",
            get(posts::post_view).post(posts::add_comment),
        )
        .route("/:username/:post_id/edit/", post(posts::post_edit))
        .route("/:username/:post_id/delete/", post(posts::delete_post))
        .route(
            "/:username/:post_id/comments/:comment_id/delete/",
            post(posts::delete_comment),
        )
        .fallback(handlers::not_found)
        .with_state(state)
}
