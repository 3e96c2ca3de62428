use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiResult,
    forms::{GroupForm, JsonForm},
    middleware::CurrentUser,
    models::{GroupPageResponse, GroupResponse},
    pagination::PageQuery,
    AppState,
};

pub async fn group_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<GroupPageResponse>> {
    let page = state.content_service.group_page(&slug, query.number()).await?;
    Ok(Json(page))
}

pub async fn list_groups(State(state): State<AppState>) -> ApiResult<Json<Vec<GroupResponse>>> {
    Ok(Json(state.content_service.list_groups().await?))
}

pub async fn create_group(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonForm(form): JsonForm<GroupForm>,
) -> ApiResult<(StatusCode, Json<GroupResponse>)> {
    let group = state.content_service.create_group(&user, form).await?;
    Ok((StatusCode::CREATED, Json(group)))
}
