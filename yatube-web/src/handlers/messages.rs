use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};

use crate::{
    error::ApiResult,
    forms::{JsonForm, MessageForm},
    middleware::CurrentUser,
    models::MailboxResponse,
    pagination::PageQuery,
    utils::messages_path,
    AppState,
};

pub async fn send_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(username): Path<String>,
    JsonForm(form): JsonForm<MessageForm>,
) -> ApiResult<Redirect> {
    state.message_service.send(&user, &username, form).await?;
    Ok(Redirect::to(&messages_path(&username)))
}

/// Own mailbox, or the conversation with `username`
pub async fn messages(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<MailboxResponse>> {
    let mailbox = state
        .message_service
        .messages_page(&user, &username, query.number())
        .await?;
    Ok(Json(mailbox))
}
