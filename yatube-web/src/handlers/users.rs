use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::ApiResult,
    forms::{JsonForm, SignupForm},
    models::UserResponse,
    AppState,
};

pub async fn signup(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<SignupForm>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.signup(form).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}
