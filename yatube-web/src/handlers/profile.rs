use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};

use crate::{
    error::ApiResult,
    middleware::{CurrentUser, MaybeUser},
    models::{PostWithAuthor, ProfileResponse, UserResponse},
    pagination::{Page, PageQuery},
    utils::profile_path,
    AppState,
};

pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    viewer: MaybeUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state
        .content_service
        .profile(&username, viewer.user(), query.number())
        .await?;
    Ok(Json(profile))
}

/// Posts of the authors the current user follows
pub async fn follow_index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<PostWithAuthor>>> {
    Ok(Json(state.feed_service.feed(&user, query.number()).await?))
}

pub async fn profile_follow(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(username): Path<String>,
) -> ApiResult<Redirect> {
    state.social_service.follow(&user, &username).await?;
    Ok(Redirect::to(&profile_path(&username)))
}

pub async fn profile_unfollow(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(username): Path<String>,
) -> ApiResult<Redirect> {
    state.social_service.unfollow(&user, &username).await?;
    Ok(Redirect::to(&profile_path(&username)))
}

pub async fn following(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    Ok(Json(state.social_service.get_following(&username).await?))
}

pub async fn followers(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    Ok(Json(state.social_service.get_followers(&username).await?))
}
