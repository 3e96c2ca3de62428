use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};

use crate::{
    error::ApiResult,
    forms::{CommentForm, JsonForm, PostForm},
    middleware::{CurrentUser, MaybeUser},
    models::{PostDetailResponse, PostWithAuthor},
    pagination::{Page, PageQuery},
    services::Mutation,
    utils::{parse_id, post_path},
    AppState,
};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<PostWithAuthor>>> {
    Ok(Json(state.content_service.index(query.number()).await?))
}

pub async fn new_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonForm(form): JsonForm<PostForm>,
) -> ApiResult<Redirect> {
    state.content_service.create_post(&user, form).await?;
    Ok(Redirect::to("/"))
}

pub async fn post_view(
    State(state): State<AppState>,
    Path((username, post_id)): Path<(String, String)>,
    viewer: MaybeUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<PostDetailResponse>> {
    let post_id = parse_id("Post", &post_id)?;
    let detail = state
        .content_service
        .post_detail(&username, post_id, viewer.user(), query.number())
        .await?;
    Ok(Json(detail))
}

pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((username, post_id)): Path<(String, String)>,
    JsonForm(form): JsonForm<CommentForm>,
) -> ApiResult<Redirect> {
    let post_id = parse_id("Post", &post_id)?;
    state
        .content_service
        .add_comment(&user, &username, post_id, form)
        .await?;
    Ok(Redirect::to(&post_path(&username, post_id)))
}

/// Edit a post; anyone but the author is sent back to the post
pub async fn post_edit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((username, post_id)): Path<(String, String)>,
    JsonForm(form): JsonForm<PostForm>,
) -> ApiResult<Redirect> {
    let post_id = parse_id("Post", &post_id)?;
    state
        .content_service
        .edit_post(&user, &username, post_id, form)
        .await?;
    Ok(Redirect::to(&post_path(&username, post_id)))
}

pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((username, post_id)): Path<(String, String)>,
) -> ApiResult<Redirect> {
    let post_id = parse_id("Post", &post_id)?;
    let outcome = state
        .content_service
        .delete_post(&user, &username, post_id)
        .await?;

    Ok(match outcome {
        Mutation::Applied => Redirect::to("/"),
        Mutation::Denied => Redirect::to(&post_path(&username, post_id)),
    })
}

pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((username, post_id, comment_id)): Path<(String, String, String)>,
) -> ApiResult<Redirect> {
    let post_id = parse_id("Post", &post_id)?;
    let comment_id = parse_id("Comment", &comment_id)?;
    state
        .content_service
        .delete_comment(&user, &username, post_id, comment_id)
        .await?;
    Ok(Redirect::to(&post_path(&username, post_id)))
}
