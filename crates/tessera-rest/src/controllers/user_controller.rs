//! User management controller.

use crate::{
    extractors::JsonBody,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tessera_core::{TesseraError, UserId};
use tessera_service::UserDto;
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users.
async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserDto>> {
    debug!("List users request");

    let response = state.user_service.list_users().await?;
    ok(response)
}

/// Create a new user.
async fn create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<UserDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), AppError> {
    debug!("Create user request: {}", request.email);

    let response = state.user_service.create_user(request).await?;
    Ok(created(response))
}

/// Get a user by ID.
async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserDto> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

/// Update a user's name and email.
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UserDto>,
) -> ApiResult<UserDto> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.update_user(user_id, request).await?;
    ok(response)
}

/// Delete a user.
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.user_service.delete_user(user_id).await?;

    Ok(no_content())
}

/// Helper to parse user ID from path parameter.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|_| AppError(TesseraError::Validation(format!("Invalid user ID: {}", id))))
}
