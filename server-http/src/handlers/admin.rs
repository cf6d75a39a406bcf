use crate::api::{
    CreateUserRequest, GrantNodeRequest, ListUsersResponse, SetTierRequest, UserResponse,
};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use nodewatch::auth::User;
use tracing::info;

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    info!(
        username = %req.username,
        tier = ?req.tier,
        requested_by = %admin.username,
        "Creating user"
    );

    let user = state
        .user_service
        .create_user(req.username, req.password, req.tier)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/admin/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<ListUsersResponse>, ApiError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(ListUsersResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/admin/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(state.user_service.get_user_by_id(&user_id).await?.into()))
}

/// PUT /api/admin/users/{user_id}/tier
pub async fn set_tier(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    Path(user_id): Path<String>,
    Json(req): Json<SetTierRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.set_tier(&user_id, req.tier).await?;

    info!(
        username = %user.username,
        tier = ?user.tier,
        requested_by = %admin.username,
        "Tier changed"
    );
    Ok(Json(user.into()))
}

/// POST /api/admin/users/{user_id}/grants
pub async fn grant_node_access(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<GrantNodeRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .grant_node_access(&user_id, &req.node_id)
        .await?;

    Ok(Json(user.into()))
}
